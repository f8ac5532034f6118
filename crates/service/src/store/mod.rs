//! Keyed persistence behind the entity services.
//!
//! A store does plain CRUD with no business validation. Each call is atomic
//! on its own; nothing spans two calls.

use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::record::{Record, RecordId};

pub mod memory;
pub mod seaorm;

pub use memory::MemoryStore;
pub use seaorm::SeaOrmStore;

#[async_trait]
pub trait Store<R: Record>: Send + Sync {
    async fn get(&self, id: RecordId) -> Result<Option<R>, ServiceError>;

    /// All records in ascending id order.
    async fn get_all(&self) -> Result<Vec<R>, ServiceError>;

    /// Insert when `record.id` is `None` (the store assigns the id),
    /// otherwise overwrite the existing row. Returns the stored record.
    async fn save(&self, record: R) -> Result<R, ServiceError>;

    /// Returns whether a row was removed.
    async fn delete(&self, id: RecordId) -> Result<bool, ServiceError>;

    async fn exists(&self, id: RecordId) -> Result<bool, ServiceError>;
}
