//! Service entry point: configuration, database, HTTP server

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use userhaus::api;
use userhaus::{db, migration, AppConfig, SqliteUserStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load()?;
    tracing::info!(
        port = config.http.port,
        database = %config.database.url,
        "starting userhaus"
    );

    let pool = db::connect(&config.database).await?;
    migration::apply_schema(&pool).await?;
    db::health_check(&pool).await?;

    let store: api::DynUserStore = Arc::new(SqliteUserStore::new(pool.clone()));
    api::serve(&config.http, store).await?;

    pool.close().await;
    Ok(())
}
