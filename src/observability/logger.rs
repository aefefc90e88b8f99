//! Subscriber setup
//!
//! Logs go to stderr so stdout stays a single JSON response per command.

use std::io;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::ObservabilityError;
use crate::config::LogFormat;

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "leadhub=info";

fn build_filter(directives: Option<&str>) -> Result<EnvFilter, ObservabilityError> {
    match directives {
        Some(d) if !d.trim().is_empty() => {
            EnvFilter::try_new(d).map_err(|e| ObservabilityError::Filter(e.to_string()))
        }
        _ => Ok(EnvFilter::new(DEFAULT_FILTER)),
    }
}

/// Install the global subscriber. Filter comes from `RUST_LOG`.
pub fn init_logging(format: LogFormat) -> Result<(), ObservabilityError> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(directives.as_deref())?;
    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(io::stderr).with_target(false))
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .try_init(),
    };

    result.map_err(|e| ObservabilityError::Init(e.to_string()))
}
