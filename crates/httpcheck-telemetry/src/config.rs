//! Telemetry configuration.

use crate::logging::{LogConfig, LogFormat};
use crate::metrics::MetricsConfig;

/// Settings for [`init_telemetry`](crate::init_telemetry).
///
/// `service_name` is copied into the metrics `service` label by the
/// builder; set fields directly only if you keep the two in step.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Name of the service embedding the checker.
    pub service_name: String,
    /// Prometheus recorder settings.
    pub metrics: MetricsConfig,
    /// Subscriber settings.
    pub logging: LogConfig,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "httpcheck".to_string(),
            metrics: MetricsConfig::default(),
            logging: LogConfig::default(),
        }
    }
}

impl TelemetryConfig {
    /// Starts a builder from the defaults.
    #[must_use]
    pub fn builder() -> TelemetryConfigBuilder {
        TelemetryConfigBuilder::default()
    }
}

/// Builder for [`TelemetryConfig`].
#[derive(Debug, Default)]
pub struct TelemetryConfigBuilder {
    config: TelemetryConfig,
}

impl TelemetryConfigBuilder {
    /// Sets the service name.
    #[must_use]
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.config.service_name = name.into();
        self
    }

    /// Replaces the logging settings.
    #[must_use]
    pub fn logging(mut self, logging: LogConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Sets the `EnvFilter` directives, e.g. `"httpcheck=debug,info"`.
    #[must_use]
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    /// Sets the log output format.
    #[must_use]
    pub fn log_format(mut self, format: LogFormat) -> Self {
        self.config.logging.format = format;
        self
    }

    /// Replaces the metrics settings.
    #[must_use]
    pub fn metrics(mut self, metrics: MetricsConfig) -> Self {
        self.config.metrics = metrics;
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(mut self) -> TelemetryConfig {
        self.config.metrics.service_name.clone_from(&self.config.service_name);
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::default();
        assert_eq!(config.service_name, "httpcheck");
        assert!(config.metrics.enabled);
        assert!(config.logging.enabled);
    }

    #[test]
    fn test_builder_copies_service_name_into_metrics() {
        let config = TelemetryConfig::builder()
            .metrics(MetricsConfig {
                service_name: "stale".into(),
                ..MetricsConfig::default()
            })
            .service_name("orders-api")
            .build();

        assert_eq!(config.service_name, "orders-api");
        assert_eq!(config.metrics.service_name, "orders-api");
    }

    #[test]
    fn test_builder_log_overrides() {
        let config = TelemetryConfig::builder()
            .logging(LogConfig::production())
            .log_level("warn")
            .log_format(LogFormat::Pretty)
            .build();

        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }
}
