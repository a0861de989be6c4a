// ABOUTME: Tracing subscriber initialization and layer composition
// ABOUTME: Combines console, file, and JSON layers with filtering for complete logging setup

use anyhow::{Context, Result};
use tracing_subscriber::{prelude::*, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::layers::{create_console_layer, create_env_filter, create_file_layer, create_json_layer};

/// Initialize the global tracing subscriber with the given configuration.
pub fn init_subscriber(config: LoggingConfig) -> Result<()> {
    let env_filter = create_env_filter(&config).context("Failed to create environment filter")?;

    let file_layer = if config.output.file {
        Some(create_file_layer(&config.file).context("Failed to create file logging layer")?)
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(create_console_layer(&config.output))
        .with(file_layer)
        .with(create_json_layer(&config.output))
        .try_init()
        .context("Failed to install global tracing subscriber")?;

    tracing::debug!(
        log_level = %config.level.0,
        console_output = config.output.console,
        file_output = config.output.file,
        json_output = config.output.json,
        file_path = %config.file.path.display(),
        "Tonal logging initialized"
    );

    Ok(())
}
