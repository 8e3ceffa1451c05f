//! Telemetry errors.

use thiserror::Error;

/// Failure to install logging or metrics.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The Prometheus recorder could not be built or installed.
    #[error("metrics setup failed: {0}")]
    MetricsInit(String),

    /// The log filter is invalid or a global subscriber already exists.
    #[error("logging setup failed: {0}")]
    LoggingInit(String),
}
