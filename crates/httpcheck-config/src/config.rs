//! Main configuration types.
//!
//! This module provides the top-level [`HttpCheckConfig`] struct and its builder.

use http::Method;
use httpcheck_telemetry::logging::create_env_filter;
use httpcheck_telemetry::LogFormat;
use serde::{Deserialize, Serialize};

use crate::{ConfigError, TelemetrySection, ValidationSection};

/// Complete httpcheck configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load configuration from files
/// and environment variables.
///
/// # Example
///
/// ```
/// use httpcheck_config::HttpCheckConfig;
///
/// let config = HttpCheckConfig::default();
/// assert_eq!(config.validation.mutating_methods, vec!["POST", "PUT"]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct HttpCheckConfig {
    /// Validation behavior.
    #[serde(default)]
    pub validation: ValidationSection,

    /// Telemetry configuration (logging, metrics).
    #[serde(default)]
    pub telemetry: TelemetrySection,
}

impl HttpCheckConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> HttpCheckConfigBuilder {
        HttpCheckConfigBuilder::new()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - A mutating method is not a valid HTTP method token
    /// - The log level is not a valid filter directive
    /// - The service name is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        for method in &self.validation.mutating_methods {
            if Method::from_bytes(method.as_bytes()).is_err() {
                return Err(ConfigError::invalid_value(
                    "validation.mutating_methods",
                    format!("invalid HTTP method: {method}"),
                ));
            }
        }

        if self.telemetry.logging.enabled {
            create_env_filter(&self.telemetry.logging.level).map_err(|e| {
                ConfigError::invalid_value("telemetry.logging.level", e.to_string())
            })?;
        }

        if self.telemetry.service_name.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "telemetry.service_name",
                "must not be empty",
            ));
        }

        Ok(())
    }

    /// Create a development configuration preset.
    ///
    /// Pretty, debug-level logs with source locations.
    ///
    /// # Example
    ///
    /// ```
    /// use httpcheck_config::HttpCheckConfig;
    ///
    /// let config = HttpCheckConfig::development();
    /// assert_eq!(config.telemetry.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();

        config.telemetry.logging.level = "debug".to_string();
        config.telemetry.logging.format = LogFormat::Pretty;
        config.telemetry.logging.include_location = true;

        config
    }

    /// Create a production configuration preset.
    ///
    /// JSON logs at info level.
    #[must_use]
    pub fn production() -> Self {
        let mut config = Self::default();

        config.telemetry.logging.level = "info".to_string();
        config.telemetry.logging.format = LogFormat::Json;
        config.telemetry.logging.include_location = false;

        config
    }
}

/// Builder for [`HttpCheckConfig`].
#[derive(Debug, Default)]
pub struct HttpCheckConfigBuilder {
    validation: Option<ValidationSection>,
    telemetry: Option<TelemetrySection>,
}

impl HttpCheckConfigBuilder {
    /// Create a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the validation section.
    #[must_use]
    pub fn validation(mut self, validation: ValidationSection) -> Self {
        self.validation = Some(validation);
        self
    }

    /// Set the telemetry section.
    #[must_use]
    pub fn telemetry(mut self, telemetry: TelemetrySection) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Build the configuration.
    ///
    /// Any unset sections will use their default values.
    #[must_use]
    pub fn build(self) -> HttpCheckConfig {
        HttpCheckConfig {
            validation: self.validation.unwrap_or_default(),
            telemetry: self.telemetry.unwrap_or_default(),
        }
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if validation fails.
    pub fn build_validated(self) -> Result<HttpCheckConfig, ConfigError> {
        let config = self.build();
        config.validate()?;
        Ok(config)
    }
}
