#![cfg(test)]
use std::sync::Arc;

use models::db::{connect_and_migrate, DatabaseConfig};

use crate::services::Services;
use crate::store::{MemoryStore, SeaOrmStore};

/// Fresh in-memory SQLite database with all migrations applied.
pub async fn sqlite_store() -> Result<SeaOrmStore, anyhow::Error> {
    let db = connect_and_migrate(&DatabaseConfig::sqlite_memory()).await?;
    Ok(SeaOrmStore::new(db))
}

pub fn memory_services() -> Services {
    Services::new(Arc::new(MemoryStore::new()))
}
