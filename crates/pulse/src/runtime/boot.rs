//! Boot — logging init and config load.

use tracing::{info, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::conf::PulseConfig;

/// Initialise the tracing / logging subsystem. Logs go to stderr so stdout
/// carries only discovered patterns.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pulse=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Load and validate configuration.
pub fn boot() -> Result<PulseConfig, Box<dyn std::error::Error>> {
    info!("Starting pulse v{}", env!("CARGO_PKG_VERSION"));

    let config = PulseConfig::load()?;
    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    info!(
        "Similarity gate: threshold={}, detour_window={}",
        config.similarity_threshold, config.detour_window
    );
    info!(
        "Limits: channel_capacity={}, max_pool_size={}, max_line_len={}",
        config.channel_capacity, config.max_pool_size, config.max_line_len
    );

    Ok(config)
}
