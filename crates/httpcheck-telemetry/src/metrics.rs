//! Prometheus metrics for the checker.
//!
//! # Standard Metrics
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `httpcheck_checks_total` | Counter | `outcome`, `stage` | Completed checks |
//! | `httpcheck_check_duration_seconds` | Histogram | `outcome` | Check latency |
//!
//! `stage` is the stage that rejected the request, or `none` when it was
//! accepted. Recording is a no-op until a recorder is installed with
//! [`init_metrics`].

use crate::error::TelemetryError;
use crate::TelemetryResult;
use ::metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;

/// Name of the check counter.
pub const CHECKS_TOTAL: &str = "httpcheck_checks_total";

/// Name of the check duration histogram.
pub const CHECK_DURATION_SECONDS: &str = "httpcheck_check_duration_seconds";

/// Global metrics handle for rendering.
static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Metrics configuration.
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Whether metrics are enabled.
    pub enabled: bool,

    /// Value of the `service` label added to every metric.
    pub service_name: String,

    /// Histogram buckets for check duration, in seconds.
    pub duration_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            service_name: "httpcheck".to_string(),
            // Checks are pure CPU work: 10us up to 50ms
            duration_buckets: vec![
                0.000_01, 0.000_05, 0.000_1, 0.000_5, 0.001, 0.005, 0.01, 0.05,
            ],
        }
    }
}

/// Outcome label of a completed check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Every declared field passed.
    Accepted,
    /// A stage failed.
    Rejected,
}

impl CheckOutcome {
    /// Returns the label value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

/// Initializes the metrics subsystem.
///
/// Installs a global Prometheus recorder without an HTTP listener; expose
/// the output with [`render_metrics`]. Calling this again after a
/// successful initialization is a no-op.
///
/// # Errors
///
/// Returns `TelemetryError::MetricsInit` if the buckets are invalid or
/// another recorder is already installed.
pub fn init_metrics(config: &MetricsConfig) -> TelemetryResult<()> {
    if !config.enabled || METRICS_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new()
        .add_global_label("service", config.service_name.clone())
        .set_buckets_for_metric(
            Matcher::Full(CHECK_DURATION_SECONDS.to_string()),
            &config.duration_buckets,
        )
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?
        .install_recorder()
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;

    let _ = METRICS_HANDLE.set(handle);

    register_metric_descriptions();

    Ok(())
}

/// Renders metrics in Prometheus text format.
///
/// Returns `None` if metrics are not initialized.
#[must_use]
pub fn render_metrics() -> Option<String> {
    METRICS_HANDLE.get().map(PrometheusHandle::render)
}

fn register_metric_descriptions() {
    describe_counter!(CHECKS_TOTAL, "Total number of request checks");
    describe_histogram!(
        CHECK_DURATION_SECONDS,
        Unit::Seconds,
        "Request check duration in seconds"
    );
}

/// Records a completed check.
///
/// Updates the following metrics:
/// - `httpcheck_checks_total` (incremented)
/// - `httpcheck_check_duration_seconds` (histogram observation)
///
/// # Arguments
///
/// * `outcome` - Whether the request was accepted
/// * `stage` - The rejecting stage, or `"none"`
/// * `duration` - Time spent checking
pub fn record_check(outcome: CheckOutcome, stage: &str, duration: Duration) {
    counter!(
        CHECKS_TOTAL,
        "outcome" => outcome.as_str(),
        "stage" => stage.to_string()
    )
    .increment(1);

    histogram!(CHECK_DURATION_SECONDS, "outcome" => outcome.as_str())
        .record(duration.as_secs_f64());
}
