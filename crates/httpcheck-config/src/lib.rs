//! Typed configuration for httpcheck.
//!
//! This crate provides a strongly-typed configuration with support for:
//! - TOML and JSON configuration files
//! - Environment variable overrides
//! - Strict validation (fails on unknown fields)
//! - Layered configuration (defaults → file → env)
//!
//! # Overview
//!
//! [`HttpCheckConfig`] has two sections:
//!
//! - [`ValidationSection`] - Which methods carry a checked payload, and how
//!   query keys without a value are read
//! - [`TelemetrySection`] - Logging and metrics
//!
//! # Example
//!
//! ```no_run
//! use httpcheck_config::ConfigLoader;
//!
//! # fn main() -> Result<(), httpcheck_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_defaults()
//!     .with_optional_file("httpcheck.toml")?
//!     .with_env_prefix("HTTPCHECK")
//!     .load()?;
//!
//! println!("Payload checked for: {:?}", config.validation.mutating_methods);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [validation]
//! mutating_methods = ["POST", "PUT", "PATCH"]
//! valueless_query_keys = "key_as_value"
//!
//! [telemetry]
//! service_name = "orders-api"
//!
//! [telemetry.logging]
//! enabled = true
//! level = "info"
//! format = "json"
//!
//! [telemetry.metrics]
//! enabled = true
//! ```
//!
//! # Environment Variable Overrides
//!
//! Values can be overridden via environment variables using the format
//! `PREFIX__SECTION__KEY`. For example:
//!
//! - `HTTPCHECK__VALIDATION__MUTATING_METHODS=POST,PUT,PATCH`
//! - `HTTPCHECK__VALIDATION__VALUELESS_QUERY_KEYS=empty`
//! - `HTTPCHECK__TELEMETRY__METRICS__ENABLED=false`

#![warn(missing_docs)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::{HttpCheckConfig, HttpCheckConfigBuilder};
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{LoggingSection, MetricsSection, TelemetrySection, ValidationSection};
