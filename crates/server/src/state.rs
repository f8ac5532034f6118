use std::sync::Arc;

use service::store::{MemoryStore, SeaOrmStore};
use service::Services;

/// Shared handler state; cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
}

impl AppState {
    pub fn new(services: Services) -> Self { Self { services } }

    /// Process-local storage, lost on restart.
    pub fn memory() -> Self { Self::new(Services::new(Arc::new(MemoryStore::new()))) }

    pub fn database(db: sea_orm::DatabaseConnection) -> Self {
        Self::new(Services::new(Arc::new(SeaOrmStore::new(db))))
    }
}
