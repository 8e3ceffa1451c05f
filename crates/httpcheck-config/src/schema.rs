//! Configuration schema types.
//!
//! This module defines the structure of all configuration sections.

use httpcheck_extract::ValuelessKeyPolicy;
use httpcheck_telemetry::{LogConfig, LogFormat, MetricsConfig, TelemetryConfig};
use serde::{Deserialize, Serialize};

/// Validation section.
///
/// Controls which requests have their payload checked and how query keys
/// without a value are read.
///
/// # Example
///
/// ```
/// use httpcheck_config::ValidationSection;
/// use httpcheck_extract::ValuelessKeyPolicy;
///
/// let section = ValidationSection {
///     mutating_methods: vec!["POST".into(), "PUT".into(), "PATCH".into()],
///     valueless_query_keys: ValuelessKeyPolicy::Empty,
/// };
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ValidationSection {
    /// Methods whose payload is checked.
    #[serde(default = "default_mutating_methods")]
    pub mutating_methods: Vec<String>,

    /// Value given to a query key written without `=`.
    #[serde(default)]
    pub valueless_query_keys: ValuelessKeyPolicy,
}

impl Default for ValidationSection {
    fn default() -> Self {
        Self {
            mutating_methods: default_mutating_methods(),
            valueless_query_keys: ValuelessKeyPolicy::default(),
        }
    }
}

fn default_mutating_methods() -> Vec<String> {
    vec!["POST".to_string(), "PUT".to_string()]
}

fn default_true() -> bool {
    true
}

/// Logging section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Filter directives (trace, debug, info, warn, error, or `target=level` lists).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include source file and line in logs.
    #[serde(default)]
    pub include_location: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            include_location: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Metrics section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MetricsSection {
    /// Enable the Prometheus recorder.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for MetricsSection {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Telemetry section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TelemetrySection {
    /// Service name, added as the `service` metric label.
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSection,

    /// Metrics configuration.
    #[serde(default)]
    pub metrics: MetricsSection,
}

impl Default for TelemetrySection {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            logging: LoggingSection::default(),
            metrics: MetricsSection::default(),
        }
    }
}

fn default_service_name() -> String {
    "httpcheck".to_string()
}

impl TelemetrySection {
    /// Converts this section into the telemetry crate's runtime config.
    #[must_use]
    pub fn to_telemetry_config(&self) -> TelemetryConfig {
        let base = match self.logging.format {
            LogFormat::Json => LogConfig::production(),
            LogFormat::Pretty => LogConfig::development(),
        };

        TelemetryConfig::builder()
            .service_name(&self.service_name)
            .logging(LogConfig {
                enabled: self.logging.enabled,
                level: self.logging.level.clone(),
                format: self.logging.format,
                file_line_info: self.logging.include_location,
                ..base
            })
            .metrics(MetricsConfig {
                enabled: self.metrics.enabled,
                ..MetricsConfig::default()
            })
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_defaults() {
        let section = ValidationSection::default();
        assert_eq!(section.mutating_methods, vec!["POST", "PUT"]);
        assert_eq!(section.valueless_query_keys, ValuelessKeyPolicy::KeyAsValue);
    }

    #[test]
    fn test_validation_partial_toml() {
        let section: ValidationSection = toml::from_str(r#"valueless_query_keys = "empty""#).unwrap();

        assert_eq!(section.valueless_query_keys, ValuelessKeyPolicy::Empty);
        assert_eq!(section.mutating_methods, vec!["POST", "PUT"]);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<ValidationSection, _> = toml::from_str("strict = true");
        assert!(result.is_err());

        let result: Result<LoggingSection, _> = toml::from_str(r#"colour = "always""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_telemetry_defaults() {
        let section = TelemetrySection::default();
        assert_eq!(section.service_name, "httpcheck");
        assert!(section.logging.enabled);
        assert_eq!(section.logging.level, "info");
        assert_eq!(section.logging.format, LogFormat::Json);
        assert!(section.metrics.enabled);
    }

    #[test]
    fn test_to_telemetry_config() {
        let section = TelemetrySection {
            service_name: "orders-api".to_string(),
            logging: LoggingSection {
                level: "httpcheck=trace".to_string(),
                format: LogFormat::Pretty,
                include_location: false,
                ..LoggingSection::default()
            },
            metrics: MetricsSection { enabled: false },
        };

        let config = section.to_telemetry_config();

        assert_eq!(config.service_name, "orders-api");
        assert_eq!(config.metrics.service_name, "orders-api");
        assert!(!config.metrics.enabled);
        assert_eq!(config.logging.level, "httpcheck=trace");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(!config.logging.file_line_info);
        // Pretty output keeps the development span events
        assert!(config.logging.span_events);
    }
}
