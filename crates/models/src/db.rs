use std::str::FromStr;
use std::time::Duration;

use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sea_orm::sqlx::ConnectOptions as _;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, SqlxSqliteConnector};
use tracing::{info, warn};

use crate::errors::ModelError;

/// Pool settings resolved from `configs::DatabaseConfig`.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    /// `None` keeps idle connections open indefinitely.
    pub idle_timeout: Option<Duration>,
    /// `None` never recycles a connection because of its age.
    pub max_lifetime: Option<Duration>,
    pub acquire_timeout: Duration,
    pub sqlx_logging: bool,
}

impl DatabaseConfig {
    /// Single-connection config for throwaway in-memory SQLite databases.
    ///
    /// Every pooled connection to `sqlite::memory:` opens its own database,
    /// so the pool is pinned to exactly one connection that is never
    /// recycled: closing it drops the data.
    pub fn sqlite_memory() -> Self {
        Self {
            url: "sqlite::memory:".into(),
            max_connections: 1,
            min_connections: 1,
            idle_timeout: None,
            max_lifetime: None,
            ..Self::default()
        }
    }

    pub fn is_sqlite_memory(&self) -> bool {
        let url = self.url.to_ascii_lowercase();
        url.starts_with("sqlite:") && (url.contains(":memory:") || url.contains("mode=memory"))
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 2,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)),
            max_lifetime: Some(Duration::from_secs(3600)),
            acquire_timeout: Duration::from_secs(30),
            sqlx_logging: false,
        }
    }
}

impl From<&configs::DatabaseConfig> for DatabaseConfig {
    fn from(c: &configs::DatabaseConfig) -> Self {
        Self {
            url: c.url.clone(),
            max_connections: c.max_connections,
            min_connections: c.min_connections,
            connect_timeout: Duration::from_secs(c.connect_timeout_secs),
            idle_timeout: Some(Duration::from_secs(c.idle_timeout_secs)),
            max_lifetime: Some(Duration::from_secs(c.max_lifetime_secs)),
            acquire_timeout: Duration::from_secs(c.acquire_timeout_secs),
            sqlx_logging: c.sqlx_logging,
        }
    }
}

pub async fn connect_with_config(cfg: &DatabaseConfig) -> Result<DatabaseConnection, ModelError> {
    if cfg.url.trim().is_empty() {
        return Err(ModelError::Config("database url is empty".into()));
    }
    if cfg.is_sqlite_memory() {
        return connect_sqlite_memory(cfg).await;
    }
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(cfg.connect_timeout)
        .acquire_timeout(cfg.acquire_timeout)
        .sqlx_logging(cfg.sqlx_logging);
    if let Some(idle) = cfg.idle_timeout {
        opts.idle_timeout(idle);
    }
    if let Some(lifetime) = cfg.max_lifetime {
        opts.max_lifetime(lifetime);
    }
    let db = Database::connect(opts).await?;
    info!(max_connections = cfg.max_connections, "database pool ready");
    Ok(db)
}

/// One connection that lives as long as the pool.
///
/// `ConnectOptions` cannot switch off the sqlx idle and lifetime reaper,
/// so the pool is built directly.
async fn connect_sqlite_memory(cfg: &DatabaseConfig) -> Result<DatabaseConnection, ModelError> {
    if cfg.max_connections != 1 || cfg.idle_timeout.is_some() || cfg.max_lifetime.is_some() {
        warn!(url = %cfg.url, "in-memory sqlite uses a single connection without idle or lifetime limits");
    }
    let mut opts = SqliteConnectOptions::from_str(&cfg.url).map_err(|e| ModelError::Config(e.to_string()))?;
    if !cfg.sqlx_logging {
        opts = opts.disable_statement_logging();
    }
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .acquire_timeout(cfg.acquire_timeout)
        .connect_with(opts)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    info!("in-memory sqlite pool ready");
    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

/// Connect and bring the schema up to date.
pub async fn connect_and_migrate(cfg: &DatabaseConfig) -> Result<DatabaseConnection, ModelError> {
    use migration::MigratorTrait;
    let db = connect_with_config(cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
