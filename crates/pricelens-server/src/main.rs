use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use pricelens_server::config::ServerConfig;
use pricelens_server::routes;
use pricelens_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("pricelens=info".parse()?))
        .with_target(false)
        .init();

    let config = ServerConfig::from_env()?;
    let addr = config.bind_addr();

    tracing::info!(
        timeout_ms = %config.fetch.timeout.as_millis(),
        max_retries = config.fetch.max_retries,
        base_delay_ms = %config.fetch.base_delay.as_millis(),
        "Fetch configuration loaded"
    );

    let state = Arc::new(AppState::new(&config.fetch)?);
    let app = routes::app(state);

    tracing::info!("Backend running on {addr}");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install CTRL+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
