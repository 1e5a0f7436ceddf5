use crate::config::loader::Config;
use sqlx::any::{install_default_drivers, AnyPoolOptions};
use sqlx::AnyPool;
use tracing::info;

/// Build the shared connection pool. Connections are opened on first use, so
/// the server comes up even when the database is down.
pub async fn init_db(config: &Config) -> Result<AnyPool, sqlx::Error> {
    install_default_drivers();

    let driver = config
        .database_url
        .split(':')
        .next()
        .unwrap_or_default();
    info!("Using database driver: {}", driver);

    AnyPoolOptions::new().connect_lazy(&config.database_url)
}
