//! Logging initialization.

use crate::settings::LoggingConfig;
use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Install the global subscriber. `RUST_LOG` takes precedence over the configured level.
///
/// Logs go to stderr so stdout stays free for summaries.
pub fn init(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))?;

    if logging.format == "json" {
        init_json(filter, logging)
    } else {
        init_console(filter, logging)
    }
}

fn init_json(filter: EnvFilter, logging: &LoggingConfig) -> Result<()> {
    let subscriber = Registry::default().with(filter).with(
        fmt::layer()
            .json()
            .with_target(logging.enable_target)
            .with_writer(std::io::stderr),
    );

    tracing::subscriber::set_global_default(subscriber)?;
    tracing::debug!("JSON logging initialized");
    Ok(())
}

fn init_console(filter: EnvFilter, logging: &LoggingConfig) -> Result<()> {
    let subscriber = Registry::default().with(filter).with(
        fmt::layer()
            .with_target(logging.enable_target)
            .with_writer(std::io::stderr),
    );

    tracing::subscriber::set_global_default(subscriber)?;
    tracing::debug!("Console logging initialized");
    Ok(())
}
