//! Logging setup.
//!
//! Installs a `tracing-subscriber` registry with an [`EnvFilter`], the
//! `tracing-error` [`ErrorLayer`], and a pretty or JSON formatter writing to
//! stderr. `RUST_LOG` takes precedence over the configured level.

use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

use crate::config::LogConfig;
use crate::error::{MaukaError, MaukaResult};

/// Builds the filter for `config`, letting `RUST_LOG` override it.
pub fn env_filter(config: &LogConfig) -> MaukaResult<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| MaukaError::Custom(format!("Invalid log filter '{}': {e}", config.level))),
    }
}

/// Initialize the logging system.
///
/// # Errors
///
/// Fails if the level is not a valid filter or a global subscriber is
/// already installed.
pub fn init_logging(config: &LogConfig) -> MaukaResult<()> {
    let filter = env_filter(config)?;
    let registry = Registry::default().with(filter).with(ErrorLayer::default());

    let result = if config.json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_file(config.source_location)
                    .with_line_number(config.source_location),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr)
                    .with_file(config.source_location)
                    .with_line_number(config.source_location)
                    .with_thread_names(true),
            )
            .try_init()
    };

    result.map_err(|e| MaukaError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}
