//! Observability for the leadhub client
//!
//! Structured `tracing` events, each carrying an `event` field named
//! `area.action` (`session.login`, `api.request`, `leads.create`, ...).
//! Tokens and passwords are never recorded.

mod logger;

pub use logger::{init_logging, DEFAULT_FILTER};

use thiserror::Error;

/// Observability errors are reported but never fatal
#[derive(Debug, Error)]
pub enum ObservabilityError {
    #[error("Invalid log filter: {0}")]
    Filter(String),

    #[error("Failed to init tracing: {0}")]
    Init(String),
}
