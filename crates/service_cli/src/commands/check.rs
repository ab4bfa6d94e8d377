//! Check command implementation
//!
//! Prints the resolved configuration and the worker pool size.

use tracing::info;

use crate::config::{ConfigError, PipelineConfig};
use crate::Result;

/// Run the check command
pub fn run(config: &PipelineConfig) -> Result<String> {
    info!("Checking configuration...");
    let rendered = toml::to_string_pretty(config)
        .map_err(|e| ConfigError::FileError(format!("Failed to render configuration: {}", e)))?;
    let workers = config.parallel_config().worker_count();

    println!("{}", rendered);
    println!("# worker threads: {}", workers);
    info!("Configuration valid");
    Ok(rendered)
}
