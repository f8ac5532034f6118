use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DatabaseBackend, EntityTrait, PaginatorTrait, Set};

use super::memory_db;
use crate::{author, db::{connect_and_migrate, connect_with_config, DatabaseConfig}, errors::ModelError, post, post_tag, tag};

#[tokio::test]
async fn migrations_create_all_tables() -> anyhow::Result<()> {
    let db = memory_db().await?;
    assert_eq!(db.get_database_backend(), DatabaseBackend::Sqlite);

    assert_eq!(author::Entity::find().count(&db).await?, 0);
    assert_eq!(post::Entity::find().count(&db).await?, 0);
    assert_eq!(tag::Entity::find().count(&db).await?, 0);
    assert_eq!(post_tag::Entity::find().count(&db).await?, 0);
    Ok(())
}

#[tokio::test]
async fn migrations_are_reversible() -> anyhow::Result<()> {
    let db = memory_db().await?;
    migration::Migrator::down(&db, None).await?;
    assert!(author::Entity::find().count(&db).await.is_err());
    migration::Migrator::up(&db, None).await?;
    assert_eq!(author::Entity::find().count(&db).await?, 0);
    Ok(())
}

#[test]
fn config_conversion_keeps_pool_settings() {
    let raw = configs::DatabaseConfig {
        url: "postgres://blog@localhost/blog".into(),
        max_connections: 7,
        min_connections: 3,
        connect_timeout_secs: 4,
        idle_timeout_secs: 5,
        max_lifetime_secs: 6,
        acquire_timeout_secs: 8,
        sqlx_logging: true,
    };
    let cfg = DatabaseConfig::from(&raw);
    assert_eq!(cfg.url, raw.url);
    assert_eq!(cfg.max_connections, 7);
    assert_eq!(cfg.min_connections, 3);
    assert_eq!(cfg.acquire_timeout.as_secs(), 8);
    assert!(cfg.sqlx_logging);
}

#[test]
fn sqlite_memory_pins_single_connection() {
    let cfg = DatabaseConfig::sqlite_memory();
    assert_eq!(cfg.max_connections, 1);
    assert_eq!(cfg.min_connections, 1);
    assert_eq!(cfg.idle_timeout, None);
    assert_eq!(cfg.max_lifetime, None);
    assert!(cfg.is_sqlite_memory());
}

#[tokio::test]
async fn in_memory_pool_is_never_recycled() -> anyhow::Result<()> {
    // pool settings as they arrive from config.toml
    let raw = configs::DatabaseConfig { url: "sqlite::memory:".into(), ..Default::default() };
    let db = connect_and_migrate(&DatabaseConfig::from(&raw)).await?;

    let pool = db.get_sqlite_connection_pool();
    assert_eq!(pool.options().get_max_connections(), 1);
    assert_eq!(pool.options().get_idle_timeout(), None);
    assert_eq!(pool.options().get_max_lifetime(), None);

    author::ActiveModel { name: Set(Some("Ada".into())), ..Default::default() }.insert(&db).await?;
    assert_eq!(author::Entity::find().count(&db).await?, 1);
    Ok(())
}

#[tokio::test]
async fn empty_url_is_a_config_error() {
    let res = connect_with_config(&DatabaseConfig::default()).await;
    assert!(matches!(res, Err(ModelError::Config(_))));
}
