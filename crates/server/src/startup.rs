use std::net::SocketAddr;

use axum::Router;
use configs::{AppConfig, StorageBackend};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// `config.toml` when present, otherwise env vars only.
pub fn load_config() -> Result<AppConfig, StartupError> {
    load_config_from(&configs::config_path())
}

/// A config file that exists but does not parse or validate is fatal.
pub fn load_config_from(path: &str) -> Result<AppConfig, StartupError> {
    let loaded = AppConfig::load_if_present(path)
        .map_err(|e| StartupError::InvalidConfig(format!("{path}: {e}")))?;
    match loaded {
        Some(cfg) => Ok(cfg),
        None => {
            info!(%path, "no config file, using environment");
            AppConfig::from_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))
        }
    }
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address: {e}")))
}

/// Pick the store named by `[storage] backend`; the database is migrated first.
pub async fn build_state(cfg: &AppConfig) -> Result<AppState, StartupError> {
    match cfg.storage.backend {
        StorageBackend::Memory => {
            info!(backend = "memory", "using in-memory storage");
            Ok(AppState::memory())
        }
        StorageBackend::Database => {
            let db_cfg = models::db::DatabaseConfig::from(&cfg.database);
            let db = models::db::connect_and_migrate(&db_cfg).await?;
            info!(backend = "database", "database connected and migrated");
            Ok(AppState::database(db))
        }
    }
}

pub fn build_app(state: AppState) -> Router {
    routes::build_router(state, build_cors())
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    let cfg = load_config()?;
    let state = build_state(&cfg).await?;
    let app = build_app(state);

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting blog records server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_from_config() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "0.0.0.0".into();
        cfg.server.port = 9000;
        assert_eq!(bind_addr(&cfg).unwrap().to_string(), "0.0.0.0:9000");

        cfg.server.host = "not a host".into();
        assert!(matches!(bind_addr(&cfg), Err(StartupError::InvalidConfig(_))));
    }

    #[test]
    fn broken_config_file_is_fatal() {
        let path = std::env::temp_dir().join(format!("blog-records-startup-{}.toml", std::process::id()));
        std::fs::write(&path, "[server]\nhost = \"127.0.0.1\"\nport = \"eighty\"\n").unwrap();
        let res = load_config_from(&path.to_string_lossy());
        assert!(matches!(res, Err(StartupError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn memory_backend_needs_no_database() -> anyhow::Result<()> {
        let mut cfg = AppConfig::default();
        cfg.storage.backend = StorageBackend::Memory;
        let state = build_state(&cfg).await?;
        assert!(matches!(
            state.services.authors.get_all().await,
            Err(service::ServiceError::NotFound(_))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn sqlite_backend_is_migrated_on_startup() -> anyhow::Result<()> {
        let mut cfg = AppConfig::default();
        cfg.storage.backend = StorageBackend::Database;
        cfg.database.url = "sqlite::memory:".into();
        cfg.database.max_connections = 1;
        cfg.database.min_connections = 1;
        let state = build_state(&cfg).await?;
        state
            .services
            .tags
            .create(service::dto::TagDto { name: Some("rust".into()), ..Default::default() })
            .await?;
        assert_eq!(state.services.tags.get_all().await?.len(), 1);
        Ok(())
    }
}
