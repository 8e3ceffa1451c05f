//! The validation orchestrator.
//!
//! A check runs three stages in order: path parameters, query parameters,
//! then the JSON payload. The first failing stage stops the check; later
//! stages are not attempted.
//!
//! | Stage | Absent value | Present value |
//! |-------|--------------|---------------|
//! | params | `None` | always coerced, even when empty |
//! | queries | `None` if nullable, else missing | empty counts as absent |
//! | payload | `None` if nullable, else missing | `null` and `""` count as absent |
//!
//! The payload stage only runs for mutating methods and only when the
//! schema declares payload fields. Otherwise the body and its Content-Type
//! are never looked at.

use std::time::Instant;

use http::Method;
use httpcheck_config::{ConfigError, HttpCheckConfig, ValidationSection};
use httpcheck_core::{
    coerce, CheckError, CheckResult, FieldSource, FieldSpec, RawValue, Schema, TypedValue,
};
use httpcheck_extract::{extract_payload, extract_queries, RequestContext, ValuelessKeyPolicy};
use httpcheck_telemetry::{record_check, CheckOutcome};
use tracing::{debug, trace};

use crate::ValidationResult;

/// Options controlling a [`RequestChecker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOptions {
    /// Methods whose payload is checked. Defaults to `POST` and `PUT`.
    pub mutating_methods: Vec<Method>,
    /// How query keys without `=` are read.
    pub valueless_keys: ValuelessKeyPolicy,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            mutating_methods: vec![Method::POST, Method::PUT],
            valueless_keys: ValuelessKeyPolicy::default(),
        }
    }
}

impl TryFrom<&ValidationSection> for CheckOptions {
    type Error = ConfigError;

    fn try_from(section: &ValidationSection) -> Result<Self, Self::Error> {
        let mutating_methods = section
            .mutating_methods
            .iter()
            .map(|name| {
                Method::from_bytes(name.to_uppercase().as_bytes()).map_err(|_| {
                    ConfigError::invalid_value(
                        "validation.mutating_methods",
                        format!("invalid HTTP method: {name}"),
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            mutating_methods,
            valueless_keys: section.valueless_query_keys,
        })
    }
}

/// Checks requests against route schemas.
///
/// A checker holds no per-request state; share one behind an `Arc` across
/// threads.
///
/// # Example
///
/// ```rust
/// use httpcheck::{RequestChecker, RequestContextBuilder};
/// use httpcheck_core::{FieldSource, FieldSpec, FieldType, Schema, TypedValue};
/// use http::Uri;
///
/// let schema = Schema::builder()
///     .param(FieldSpec::required("id", FieldType::Int))
///     .query(FieldSpec::nullable("expand", FieldType::Bool))
///     .build();
///
/// let ctx = RequestContextBuilder::new()
///     .uri(Uri::from_static("/users/42?expand=true"))
///     .path_param("id", "42")
///     .build();
///
/// let result = RequestChecker::default().check(&ctx, &schema);
///
/// assert!(result.is_success());
/// assert_eq!(result.get(FieldSource::Params, "id"), Some(&TypedValue::Int(42)));
/// assert_eq!(result.get(FieldSource::Queries, "expand"), Some(&TypedValue::Bool(true)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestChecker {
    options: CheckOptions,
}

impl RequestChecker {
    /// Creates a checker with the given options.
    #[must_use]
    pub fn new(options: CheckOptions) -> Self {
        Self { options }
    }

    /// Creates a checker from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a mutating method is invalid.
    pub fn from_config(config: &HttpCheckConfig) -> Result<Self, ConfigError> {
        CheckOptions::try_from(&config.validation).map(Self::new)
    }

    /// Returns the checker's options.
    #[must_use]
    pub fn options(&self) -> &CheckOptions {
        &self.options
    }

    /// Returns `true` if requests with `method` have their payload checked.
    #[must_use]
    pub fn is_mutating(&self, method: &Method) -> bool {
        self.options.mutating_methods.contains(method)
    }

    /// Checks one request against `schema`.
    ///
    /// Never panics and never fails outright: errors are reported in the
    /// returned [`ValidationResult`].
    pub fn check(&self, ctx: &RequestContext, schema: &Schema) -> ValidationResult {
        let started = Instant::now();
        let mut result = ValidationResult::default();

        match self.run(ctx, schema, &mut result) {
            Ok(()) => {
                debug!(
                    method = %ctx.method(),
                    path = ctx.path(),
                    outcome = CheckOutcome::Accepted.as_str(),
                    "Request accepted"
                );
                record_check(CheckOutcome::Accepted, "none", started.elapsed());
            }
            Err(error) => {
                let stage = failed_stage(&error);
                debug!(
                    method = %ctx.method(),
                    path = ctx.path(),
                    stage = %stage,
                    field = error.field().map(|field| field.key.as_str()),
                    error_code = error.error_code(),
                    outcome = CheckOutcome::Rejected.as_str(),
                    "Request rejected: {error}"
                );
                record_check(CheckOutcome::Rejected, &stage.to_string(), started.elapsed());
                result.reject(error);
            }
        }

        result
    }

    fn run(
        &self,
        ctx: &RequestContext,
        schema: &Schema,
        result: &mut ValidationResult,
    ) -> CheckResult<()> {
        trace!(stage = %FieldSource::Params, fields = schema.params().len(), "Checking stage");
        for spec in schema.params() {
            let raw = ctx.path_params().get(spec.key()).map(String::as_str);
            let value = match raw {
                Some(raw) => Some(coerce_field(FieldSource::Params, spec, &RawValue::from(raw))?),
                None => None,
            };
            result.values_mut(FieldSource::Params).insert(spec.key().to_string(), value);
        }

        trace!(stage = %FieldSource::Queries, fields = schema.queries().len(), "Checking stage");
        let queries = extract_queries(ctx, self.options.valueless_keys);
        for spec in schema.queries() {
            let raw = queries.get_or_empty(spec.key());
            let value = if raw.is_empty() {
                absent_field(FieldSource::Queries, spec)?
            } else {
                Some(coerce_field(FieldSource::Queries, spec, &RawValue::from(raw))?)
            };
            result.values_mut(FieldSource::Queries).insert(spec.key().to_string(), value);
        }

        if !schema.has_payload() || !self.is_mutating(ctx.method()) {
            return Ok(());
        }

        trace!(stage = %FieldSource::Payload, fields = schema.payload().len(), "Checking stage");
        let payload = extract_payload(ctx)?;
        for spec in schema.payload() {
            let value = match payload.get(spec.key()).filter(|raw| !raw.is_absent()) {
                Some(raw) => Some(coerce_field(FieldSource::Payload, spec, raw)?),
                None => absent_field(FieldSource::Payload, spec)?,
            };
            result.values_mut(FieldSource::Payload).insert(spec.key().to_string(), value);
        }

        Ok(())
    }
}

/// Checks one request with the default options.
///
/// # Example
///
/// ```rust
/// use httpcheck::{check, RequestContextBuilder};
/// use httpcheck_core::{FieldSpec, FieldType, Schema};
/// use http::{StatusCode, Uri};
///
/// let schema = Schema::builder()
///     .query(FieldSpec::required("page", FieldType::Int))
///     .build();
///
/// let ctx = RequestContextBuilder::new().uri(Uri::from_static("/items")).build();
/// let result = check(&ctx, &schema);
///
/// assert_eq!(result.status, StatusCode::BAD_REQUEST);
/// assert_eq!(result.error().unwrap().to_string(), "page's queries value is required");
/// ```
pub fn check(ctx: &RequestContext, schema: &Schema) -> ValidationResult {
    RequestChecker::default().check(ctx, schema)
}

fn coerce_field(
    source: FieldSource,
    spec: &FieldSpec,
    raw: &RawValue,
) -> CheckResult<TypedValue> {
    coerce(spec.field_type(), raw).map_err(|error| error.at(source, spec.key()))
}

fn absent_field(
    source: FieldSource,
    spec: &FieldSpec,
) -> CheckResult<Option<TypedValue>> {
    if spec.is_nullable() {
        Ok(None)
    } else {
        Err(CheckError::missing(source, spec.key()))
    }
}

// Request-level errors only come out of the payload stage
fn failed_stage(error: &CheckError) -> FieldSource {
    error.field().map_or(FieldSource::Payload, |field| field.source)
}
