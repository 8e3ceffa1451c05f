//! # httpcheck
//!
//! **Schema-driven validation and type coercion of HTTP request inputs**
//!
//! A route declares the path parameters, query parameters and JSON payload
//! fields it expects, each with a type and a nullability flag. httpcheck
//! reads those fields from a request, coerces them into typed values and
//! reports the first problem as a `400 Bad Request`.
//!
//! ## Quick Start
//!
//! ```rust
//! use httpcheck::prelude::*;
//! use http::{Method, Uri};
//!
//! let schema = Schema::builder()
//!     .param(FieldSpec::required("id", FieldType::Int))
//!     .query(FieldSpec::nullable("dry_run", FieldType::Bool))
//!     .payload(FieldSpec::required("price", FieldType::Float))
//!     .build();
//!
//! let ctx = RequestContextBuilder::new()
//!     .method(Method::PUT)
//!     .uri(Uri::from_static("/items/9?dry_run=1"))
//!     .header("content-type", "application/json")
//!     .body(r#"{"price": 4.5}"#)
//!     .path_param("id", "9")
//!     .build();
//!
//! let result = check(&ctx, &schema);
//!
//! assert!(result.is_success());
//! assert_eq!(result.get(FieldSource::Payload, "price"), Some(&TypedValue::Float(4.5)));
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! params → queries → payload (POST/PUT only) → ValidationResult
//!    ↓         ↓          ↓
//!    └─────────┴──────────┴──→ first error: 400 + CheckError
//! ```
//!
//! ## Crates
//!
//! - [`core`] - Schemas, values, coercion and errors
//! - [`extract`] - Reading path, query and payload values from a request
//! - [`config`] - Layered configuration (defaults, file, environment)
//! - [`telemetry`] - Structured logging and Prometheus metrics

#![doc(html_root_url = "https://docs.rs/httpcheck/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use httpcheck_core as core;

// Re-export extraction types
pub use httpcheck_extract as extract;

// Re-export configuration types
pub use httpcheck_config as config;

// Re-export telemetry types
pub use httpcheck_telemetry as telemetry;

mod checker;
mod result;

pub use checker::{check, CheckOptions, RequestChecker};
pub use httpcheck_extract::{RequestContext, RequestContextBuilder};
pub use result::{FieldValues, ValidationResult};

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use httpcheck::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{check, CheckOptions, FieldValues, RequestChecker, ValidationResult};

    pub use httpcheck_core::{
        CheckError, CheckResult, FieldSource, FieldSpec, FieldType, RawValue, Schema, TypedValue,
    };

    pub use httpcheck_extract::{RequestContext, RequestContextBuilder, ValuelessKeyPolicy};

    pub use httpcheck_config::{ConfigLoader, HttpCheckConfig};

    pub use httpcheck_telemetry::{init_telemetry, TelemetryConfig};
}
