/// Schema and connection tests against in-memory SQLite
pub mod db_tests;

/// CRUD and relation tests for all entities
pub mod crud_tests;

use sea_orm::DatabaseConnection;

use crate::db::{connect_and_migrate, DatabaseConfig};

/// Fresh, migrated in-memory database per test.
pub(crate) async fn memory_db() -> anyhow::Result<DatabaseConnection> {
    Ok(connect_and_migrate(&DatabaseConfig::sqlite_memory()).await?)
}
