//! Observability for httpcheck.
//!
//! - **Logging**: `tracing-subscriber` with JSON or pretty output
//! - **Metrics**: Prometheus text format via the `metrics` crate
//!
//! The checker emits events and metrics unconditionally; this crate only
//! decides where they go. Without [`init_telemetry`] both are dropped.
//!
//! # Standard Metrics
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `httpcheck_checks_total` | Counter | `outcome`, `stage` | Completed checks |
//! | `httpcheck_check_duration_seconds` | Histogram | `outcome` | Check latency |
//!
//! # Example
//!
//! ```rust,ignore
//! use httpcheck_telemetry::{init_telemetry, render_metrics, TelemetryConfig};
//!
//! let config = TelemetryConfig::builder()
//!     .service_name("orders-api")
//!     .log_level("httpcheck=debug,info")
//!     .build();
//!
//! init_telemetry(&config)?;
//!
//! // Later, from a /metrics handler:
//! let body = render_metrics().unwrap_or_default();
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;

pub use config::{TelemetryConfig, TelemetryConfigBuilder};
pub use error::TelemetryError;
pub use logging::{init_logging, LogConfig, LogFormat};
pub use crate::metrics::{init_metrics, record_check, render_metrics, CheckOutcome, MetricsConfig};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Initializes logging, then metrics.
///
/// # Errors
///
/// Returns `TelemetryError` if either subsystem fails to initialize.
pub fn init_telemetry(config: &TelemetryConfig) -> TelemetryResult<()> {
    init_logging(&config.logging)?;
    init_metrics(&config.metrics)?;
    Ok(())
}
