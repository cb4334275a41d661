use std::time::Duration;

use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use taskdesk_core::integrations::http_client;
use taskdesk_core::{Config, Journal, LineClient, MessagingService, TelegramClient};
use taskdesk_proxy::AppState;

const DEFAULT_LOG_FILTER: &str = "taskdesk_proxy=info,taskdesk_core=info,tower_http=info";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    if let Err(e) = run().await {
        error!(error = %e, "taskdesk-proxy exited with error");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let http = http_client(Duration::from_secs(config.http.timeout_secs))?;
    let line = LineClient::from_config(&config, http.clone())?;
    let telegram = TelegramClient::from_config(&config, http)?;

    for service in [&line as &dyn MessagingService, &telegram] {
        if !service.is_configured() {
            info!(
                service = service.name(),
                "{} credential not configured; its routes will answer 500",
                service.display_name()
            );
        }
    }

    let state = AppState::new(line, telegram, Journal::new(config.journal_options()));
    let listener = TcpListener::bind(&config.server.bind).await?;
    info!(addr = %listener.local_addr()?, "taskdesk-proxy listening");

    taskdesk_proxy::serve(listener, state, shutdown_signal()).await?;
    info!("taskdesk-proxy stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
