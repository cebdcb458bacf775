//! AHSETTLE — Asian Handicap settlement engine.
//!
//! Entry point. Loads configuration, initialises structured logging and
//! serves the explorer API with graceful shutdown.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use ahsettle::config::AppConfig;
use ahsettle::dashboard;
use ahsettle::dashboard::routes::DashboardState;

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = AppConfig::load_or_default("config.toml")?;

    init_logging();

    info!(
        port = cfg.server.port,
        default_padding = cfg.explorer.default_padding,
        max_padding = cfg.explorer.max_padding,
        "ahsettle starting up"
    );

    if !cfg.server.enabled {
        info!("Server disabled in config — nothing to do.");
        return Ok(());
    }

    let state = Arc::new(DashboardState::new(cfg.explorer.clone()));
    dashboard::serve(state, cfg.server.port).await?;

    info!("ahsettle shut down cleanly.");
    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ahsettle=info"));

    let json_logging = std::env::var("AHSETTLE_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    } else {
        fmt().with_env_filter(env_filter).with_target(true).init();
    }
}
