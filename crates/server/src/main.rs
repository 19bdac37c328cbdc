use anyhow::Result;
use innkeep_core::config::{AppConfig, LoadOptions};
use innkeep_server::{api, bootstrap};

fn init_logging(config: &AppConfig) {
    use innkeep_core::config::LogFormat::{Compact, Json, Pretty};
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    run().await
}

async fn run() -> Result<()> {
    let config = AppConfig::load(LoadOptions::default())?;
    init_logging(&config);

    let address = format!("{}:{}", config.server.bind_address, config.server.port);
    let state = bootstrap::build_state(config);
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(event_name = "system.server.started", %address, "innkeep server listening");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    tracing::info!(event_name = "system.server.stopped", "innkeep server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to install shutdown signal handler");
    }
}
