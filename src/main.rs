use anyhow::Context;
use beacon_app::config::loader::Config;
use beacon_app::datasource::db::init_db;
use beacon_app::routes::router::create_routes;
use beacon_app::utils::logging::init_tracing;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::new().context("failed to load configuration")?;
    init_tracing();

    let pool = init_db(&config)
        .await
        .context("failed to set up the database pool")?;

    let addr = config.bind_addr()?;
    let app_name = config.app_name.clone();
    let app = create_routes(pool.clone(), config).context("invalid FRONTEND_URL")?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("[{}] API listening on port {}", app_name, addr.port());

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("shut down");

    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = term.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!("could not install SIGTERM handler: {}", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
