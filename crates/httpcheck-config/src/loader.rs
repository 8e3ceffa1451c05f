//! Layered configuration loading.
//!
//! Layers are applied in order, each overriding the last:
//!
//! 1. A base: [`HttpCheckConfig::default`] or a preset
//! 2. A TOML or JSON document, from a file or a string
//! 3. `PREFIX__SECTION__KEY` environment variables
//!
//! [`ConfigLoader::load`] validates the result.

use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::de::DeserializeOwned;

use crate::{ConfigError, HttpCheckConfig};

/// Source format of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    Json,
}

impl Format {
    fn of_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        extension.parse()
    }

    fn parse(self, content: &str) -> Result<HttpCheckConfig, ConfigError> {
        Ok(match self {
            Self::Toml => toml::from_str(content)?,
            Self::Json => serde_json::from_str(content)?,
        })
    }
}

impl FromStr for Format {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("toml") {
            Ok(Self::Toml)
        } else if s.eq_ignore_ascii_case("json") {
            Ok(Self::Json)
        } else {
            Err(ConfigError::unsupported_format(s))
        }
    }
}

/// Builds an [`HttpCheckConfig`] from layered sources.
///
/// # Example
///
/// ```no_run
/// use httpcheck_config::ConfigLoader;
///
/// # fn main() -> Result<(), httpcheck_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_defaults()
///     .with_file("httpcheck.toml")?
///     .with_env_prefix("HTTPCHECK")
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config: HttpCheckConfig,
    env_prefix: Option<String>,
}

impl ConfigLoader {
    /// Creates a loader starting from the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the base to [`HttpCheckConfig::default`].
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        self.config = HttpCheckConfig::default();
        self
    }

    /// Uses the development preset as the base.
    ///
    /// ```
    /// use httpcheck_config::ConfigLoader;
    ///
    /// let config = ConfigLoader::new().with_development().load().unwrap();
    /// assert_eq!(config.telemetry.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn with_development(mut self) -> Self {
        self.config = HttpCheckConfig::development();
        self
    }

    /// Uses the production preset as the base.
    #[must_use]
    pub fn with_production(mut self) -> Self {
        self.config = HttpCheckConfig::production();
        self
    }

    /// Replaces the configuration with the contents of a `.toml` or
    /// `.json` file. Sections missing from the file take their defaults.
    ///
    /// # Errors
    ///
    /// Fails if the file is missing or unreadable, has another extension,
    /// or does not parse (unknown keys included).
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let format = Format::of_path(path)?;
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        self.config = format.parse(&content)?;
        Ok(self)
    }

    /// Like [`with_file`](Self::with_file), but a missing file is skipped.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or parsed.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Replaces the configuration with a document in `format` (`"toml"` or
    /// `"json"`).
    ///
    /// ```
    /// use httpcheck_config::ConfigLoader;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_string("[validation]\nmutating_methods = [\"POST\", \"PATCH\"]", "toml")
    ///     .unwrap()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.validation.mutating_methods, ["POST", "PATCH"]);
    /// ```
    ///
    /// # Errors
    ///
    /// Fails on an unknown format or a document that does not parse.
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        self.config = format.parse::<Format>()?.parse(content)?;
        Ok(self)
    }

    /// Enables environment overrides named `PREFIX__SECTION__KEY`, e.g.
    /// `HTTPCHECK__VALIDATION__MUTATING_METHODS=POST,PUT,PATCH`.
    ///
    /// Overrides are applied by [`load`](Self::load).
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Loads `.env` from the current directory into the process
    /// environment. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Fails if a `.env` file exists but is malformed.
    pub fn with_dotenv(self) -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Err(e) if !e.not_found() => Err(e.into()),
            _ => Ok(self),
        }
    }

    /// Applies environment overrides and validates.
    ///
    /// # Errors
    ///
    /// Fails if an override is malformed or the result does not pass
    /// [`HttpCheckConfig::validate`].
    pub fn load(mut self) -> Result<HttpCheckConfig, ConfigError> {
        if let Some(prefix) = self.env_prefix.take() {
            self.apply_env_vars(env::vars(), &prefix)?;
        }

        self.config.validate()?;
        Ok(self.config)
    }

    /// Returns the configuration as layered so far, skipping environment
    /// overrides and validation.
    #[must_use]
    pub fn load_unvalidated(self) -> HttpCheckConfig {
        self.config
    }

    // Applies the variables under `prefix` in key order.
    fn apply_env_vars<I>(&mut self, vars: I, prefix: &str) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut vars: Vec<(String, String)> = vars
            .into_iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .collect();
        vars.sort();

        for (key, value) in vars {
            self.apply_env_var(&key, &value, prefix)?;
        }
        Ok(())
    }

    fn apply_env_var(&mut self, key: &str, value: &str, prefix: &str) -> Result<(), ConfigError> {
        let Some(path) = key.strip_prefix(prefix).and_then(|k| k.strip_prefix("__")) else {
            return Ok(());
        };

        let validation = &mut self.config.validation;
        let telemetry = &mut self.config.telemetry;

        match path.split("__").collect::<Vec<_>>().as_slice() {
            ["VALIDATION", "MUTATING_METHODS"] => {
                validation.mutating_methods = value
                    .split(',')
                    .map(str::trim)
                    .filter(|m| !m.is_empty())
                    .map(str::to_uppercase)
                    .collect();
            }
            ["VALIDATION", "VALUELESS_QUERY_KEYS"] => {
                validation.valueless_query_keys = env_enum(key, value)?;
            }
            ["TELEMETRY", "SERVICE_NAME"] => telemetry.service_name = value.to_string(),
            ["TELEMETRY", "LOGGING", "ENABLED"] => telemetry.logging.enabled = env_bool(key, value)?,
            ["TELEMETRY", "LOGGING", "LEVEL"] => telemetry.logging.level = value.to_string(),
            ["TELEMETRY", "LOGGING", "FORMAT"] => telemetry.logging.format = env_enum(key, value)?,
            ["TELEMETRY", "LOGGING", "INCLUDE_LOCATION"] => {
                telemetry.logging.include_location = env_bool(key, value)?;
            }
            ["TELEMETRY", "METRICS", "ENABLED"] => telemetry.metrics.enabled = env_bool(key, value)?,
            _ => {}
        }

        Ok(())
    }
}

fn env_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    parse_bool(value).ok_or_else(|| ConfigError::env(key, "expected a boolean"))
}

// Enum settings take the same lower-case names as in files.
fn env_enum<T: DeserializeOwned>(key: &str, value: &str) -> Result<T, ConfigError> {
    serde_json::from_value(serde_json::Value::String(value.to_lowercase()))
        .map_err(|e| ConfigError::env(key, e.to_string()))
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpcheck_extract::ValuelessKeyPolicy;
    use httpcheck_telemetry::LogFormat;

    #[test]
    fn test_loader_defaults() {
        let config = ConfigLoader::new().load().unwrap();
        assert_eq!(config, HttpCheckConfig::default());
    }

    #[test]
    fn test_loader_with_production() {
        let config = ConfigLoader::new().with_production().load().unwrap();
        assert_eq!(config.telemetry.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_format_names() {
        assert_eq!("TOML".parse::<Format>().unwrap(), Format::Toml);
        assert_eq!("json".parse::<Format>().unwrap(), Format::Json);
        assert!("yml".parse::<Format>().is_err());
        assert_eq!(Format::of_path(Path::new("conf/app.Json")).unwrap(), Format::Json);
        assert!(Format::of_path(Path::new("conf/app")).is_err());
    }

    #[test]
    fn test_with_string_toml() {
        let toml = r#"
            [validation]
            mutating_methods = ["POST", "PUT", "PATCH"]
            valueless_query_keys = "empty"
        "#;

        let config = ConfigLoader::new().with_string(toml, "toml").unwrap().load().unwrap();

        assert_eq!(config.validation.mutating_methods, ["POST", "PUT", "PATCH"]);
        assert_eq!(config.validation.valueless_query_keys, ValuelessKeyPolicy::Empty);
    }

    #[test]
    fn test_with_string_json_keeps_missing_sections() {
        let json = r#"{"telemetry": {"service_name": "orders-api", "metrics": {"enabled": false}}}"#;

        let config = ConfigLoader::new().with_string(json, "json").unwrap().load().unwrap();

        assert_eq!(config.telemetry.service_name, "orders-api");
        assert!(!config.telemetry.metrics.enabled);
        assert_eq!(config.validation.mutating_methods, ["POST", "PUT"]);
    }

    #[test]
    fn test_with_string_unknown_format() {
        let result = ConfigLoader::new().with_string("a: 1", "yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat { .. })));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let result = ConfigLoader::new().with_string("[validation]\nstrict = true", "toml");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_load_validates() {
        let toml = r#"
            [validation]
            mutating_methods = ["PO ST"]
        "#;

        let result = ConfigLoader::new().with_string(toml, "toml").unwrap().load();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = ConfigLoader::new().with_file("/nonexistent/httpcheck.toml");
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));

        let config = ConfigLoader::new()
            .with_optional_file("/nonexistent/httpcheck.toml")
            .unwrap()
            .load()
            .unwrap();
        assert_eq!(config, HttpCheckConfig::default());
    }

    #[test]
    fn test_load_unvalidated() {
        let mut loader = ConfigLoader::new();
        loader.config.telemetry.service_name = String::new();

        let config = loader.load_unvalidated();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_bool() {
        for yes in ["true", "TRUE", "1", "on", "Yes"] {
            assert_eq!(parse_bool(yes), Some(true), "{yes}");
        }
        for no in ["False", "0", "off", "no"] {
            assert_eq!(parse_bool(no), Some(false), "{no}");
        }
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(parse_bool(""), None);
    }

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_env_vars_filtered_by_prefix() {
        let mut loader = ConfigLoader::new();
        loader
            .apply_env_vars(
                vars(&[
                    ("PATH", "/usr/bin"),
                    ("HTTPCHECK__VALIDATION__MUTATING_METHODS", "PATCH"),
                    ("HTTPCHECK__TELEMETRY__SERVICE_NAME", "orders-api"),
                    ("OTHER__TELEMETRY__SERVICE_NAME", "ignored"),
                    ("HTTPCHECKER__TELEMETRY__SERVICE_NAME", "ignored"),
                ]),
                "HTTPCHECK",
            )
            .unwrap();

        assert_eq!(loader.config.validation.mutating_methods, ["PATCH"]);
        assert_eq!(loader.config.telemetry.service_name, "orders-api");
    }

    #[test]
    fn test_env_vars_stop_at_first_bad_value() {
        let mut loader = ConfigLoader::new();
        let result = loader.apply_env_vars(
            vars(&[("HTTPCHECK__TELEMETRY__METRICS__ENABLED", "sometimes")]),
            "HTTPCHECK",
        );
        assert!(matches!(
            result,
            Err(ConfigError::Env { var, .. }) if var == "HTTPCHECK__TELEMETRY__METRICS__ENABLED"
        ));
    }

    #[test]
    fn test_load_reads_process_environment() {
        // Unique prefix so parallel tests never see these variables.
        env::set_var("HTTPCHECK_LOADER_ENV__VALIDATION__MUTATING_METHODS", "put,delete");
        env::set_var("HTTPCHECK_LOADER_ENV__TELEMETRY__LOGGING__LEVEL", "trace");

        let config = ConfigLoader::new()
            .with_env_prefix("httpcheck_loader_env")
            .load()
            .unwrap();

        assert_eq!(config.validation.mutating_methods, ["PUT", "DELETE"]);
        assert_eq!(config.telemetry.logging.level, "trace");
    }

    #[test]
    fn test_env_mutating_methods() {
        let mut loader = ConfigLoader::new();
        loader
            .apply_env_var("TEST__VALIDATION__MUTATING_METHODS", "post, put,patch,", "TEST")
            .unwrap();
        assert_eq!(loader.config.validation.mutating_methods, ["POST", "PUT", "PATCH"]);
    }

    #[test]
    fn test_env_valueless_keys() {
        let mut loader = ConfigLoader::new();
        loader
            .apply_env_var("TEST__VALIDATION__VALUELESS_QUERY_KEYS", "EMPTY", "TEST")
            .unwrap();
        assert_eq!(
            loader.config.validation.valueless_query_keys,
            ValuelessKeyPolicy::Empty
        );

        let result = loader.apply_env_var("TEST__VALIDATION__VALUELESS_QUERY_KEYS", "drop", "TEST");
        assert!(matches!(result, Err(ConfigError::Env { .. })));
    }

    #[test]
    fn test_env_telemetry() {
        let mut loader = ConfigLoader::new();
        for (key, value) in [
            ("TEST__TELEMETRY__SERVICE_NAME", "orders-api"),
            ("TEST__TELEMETRY__LOGGING__LEVEL", "debug"),
            ("TEST__TELEMETRY__LOGGING__FORMAT", "Pretty"),
            ("TEST__TELEMETRY__METRICS__ENABLED", "false"),
        ] {
            loader.apply_env_var(key, value, "TEST").unwrap();
        }

        let telemetry = &loader.config.telemetry;
        assert_eq!(telemetry.service_name, "orders-api");
        assert_eq!(telemetry.logging.level, "debug");
        assert_eq!(telemetry.logging.format, LogFormat::Pretty);
        assert!(!telemetry.metrics.enabled);
    }

    #[test]
    fn test_env_invalid_boolean() {
        let mut loader = ConfigLoader::new();
        let result = loader.apply_env_var("TEST__TELEMETRY__LOGGING__ENABLED", "sometimes", "TEST");
        assert!(matches!(result, Err(ConfigError::Env { .. })));
    }

    #[test]
    fn test_env_ignores_unrelated_keys() {
        let mut loader = ConfigLoader::new();
        loader.apply_env_var("TESTING_MODE", "1", "TEST").unwrap();
        loader.apply_env_var("TEST__UNKNOWN__KEY", "x", "TEST").unwrap();
        assert_eq!(loader.config, HttpCheckConfig::default());
    }
}
