//! Structured debug logging system

use tracing_subscriber::EnvFilter;

/// Debug logger for structured logging
#[derive(Debug)]
pub struct DebugLogger;

impl DebugLogger {
    /// Create new debug logger
    pub fn new() -> Self {
        Self
    }

    /// Initialize the logging system. Respects `RUST_LOG`, defaulting to
    /// `info`. Safe to call more than once; later calls are no-ops.
    pub fn init_logging() {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        if tracing_subscriber::fmt().with_env_filter(filter).try_init().is_ok() {
            tracing::debug!("Diagnostics logging initialized");
        }
    }
}

impl Default for DebugLogger {
    fn default() -> Self {
        Self::new()
    }
}
