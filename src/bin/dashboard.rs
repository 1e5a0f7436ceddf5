//! Terminal dashboard: fetches the API health report once and prints the
//! database status.

use anyhow::Context;
use beacon_app::config::loader::Config;
use beacon_app::models::context_dto::RequestContext;
use beacon_app::services::api_client::ApiClient;
use beacon_app::services::dashboard::StatusDisplay;
use beacon_app::utils::logging::init_tracing_stderr;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::new().context("failed to load configuration")?;
    init_tracing_stderr();

    config.require_publishable_key()?;

    let client = ApiClient::new(&config.api_base_url());
    tracing::info!("[{}] dashboard using {}", config.app_name, config.health_url());

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let mut display = StatusDisplay::new();
    println!("{}", display.render_page());

    display
        .load(&client, &RequestContext::anonymous(), &cancel)
        .await;
    if cancel.is_cancelled() {
        return Ok(());
    }

    println!("{}", display.render_page());
    Ok(())
}
