//! Validation error types.
//!
//! Every failure produced while checking a request is a [`CheckError`].
//! All of them stem from client input, so they map to `400 Bad Request`.
//!
//! Coercion errors are raised without knowing which field they belong to;
//! the orchestrator attaches that context with [`CheckError::at`].

use crate::FieldType;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type alias using [`CheckError`].
pub type CheckResult<T> = Result<T, CheckError>;

/// Part of the request a field is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSource {
    /// Path parameters (e.g., `/users/{id}`)
    Params,
    /// Query string parameters
    Queries,
    /// JSON request body
    Payload,
}

impl fmt::Display for FieldSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Params => write!(f, "params"),
            Self::Queries => write!(f, "queries"),
            Self::Payload => write!(f, "payload"),
        }
    }
}

/// Identifies the declared field an error belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRef {
    /// Where the field was read from.
    pub source: FieldSource,
    /// The declared field key.
    pub key: String,
}

impl FieldRef {
    /// Creates a new field reference.
    #[must_use]
    pub fn new(source: FieldSource, key: impl Into<String>) -> Self {
        Self {
            source,
            key: key.into(),
        }
    }

    fn suffix(field: &Option<Self>) -> String {
        match field {
            Some(field) => format!(" ({} field '{}')", field.source, field.key),
            None => String::new(),
        }
    }
}

/// Error produced while validating a request.
///
/// # Example
///
/// ```
/// use httpcheck_core::{CheckError, FieldSource, FieldType};
/// use http::StatusCode;
///
/// let err = CheckError::conversion("abc", FieldType::Int).at(FieldSource::Queries, "limit");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// assert_eq!(err.error_code(), "CONVERSION_ERROR");
/// assert!(err.to_string().contains("limit"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    /// A non-nullable query or payload key is absent.
    #[error("{}'s {} value is required", .field.key, .field.source)]
    MissingRequiredField {
        /// The missing field.
        field: FieldRef,
    },

    /// A value is present but cannot be parsed as the declared type.
    #[error("cannot convert '{value}' to {target}{}", FieldRef::suffix(.field))]
    ConversionError {
        /// The rendered value that failed to parse.
        value: String,
        /// The declared target type.
        target: FieldType,
        /// The field being coerced, once known.
        field: Option<FieldRef>,
    },

    /// A declared type name is unknown, or a composite value was supplied
    /// for a type that cannot hold one.
    #[error("{type_name}'s type is not supported{}", FieldRef::suffix(.field))]
    UnsupportedType {
        /// Description of the offending type.
        type_name: String,
        /// The field being coerced, once known.
        field: Option<FieldRef>,
    },

    /// Payload fields are declared but the body is not JSON.
    #[error("{content_type} is not supported by this API")]
    UnsupportedContentType {
        /// The received media type, without parameters.
        content_type: String,
    },

    /// The request body is not a JSON object.
    #[error("failed to decode payload: {reason}")]
    PayloadDecodeError {
        /// Decoder message.
        reason: String,
    },
}

impl CheckError {
    /// Creates an error for a missing required field.
    #[must_use]
    pub fn missing(source: FieldSource, key: impl Into<String>) -> Self {
        Self::MissingRequiredField {
            field: FieldRef::new(source, key),
        }
    }

    /// Creates an error for a value that does not parse as `target`.
    #[must_use]
    pub fn conversion(value: impl Into<String>, target: FieldType) -> Self {
        Self::ConversionError {
            value: value.into(),
            target,
            field: None,
        }
    }

    /// Creates an error for an unknown type name.
    #[must_use]
    pub fn unsupported_type(type_name: impl Into<String>) -> Self {
        Self::UnsupportedType {
            type_name: type_name.into(),
            field: None,
        }
    }

    /// Creates an error for a composite (object/array) value supplied for
    /// a non-`map` field.
    #[must_use]
    pub fn composite_for(target: FieldType) -> Self {
        Self::unsupported_type(format!("composite value for {target}"))
    }

    /// Creates an error for a non-JSON content type.
    #[must_use]
    pub fn unsupported_content_type(content_type: Option<&str>) -> Self {
        Self::UnsupportedContentType {
            content_type: content_type.unwrap_or("").to_string(),
        }
    }

    /// Creates an error for an undecodable payload.
    #[must_use]
    pub fn payload_decode(reason: impl Into<String>) -> Self {
        Self::PayloadDecodeError {
            reason: reason.into(),
        }
    }

    /// Attaches the field this error belongs to.
    ///
    /// Errors that already carry a field, and errors that are not about a
    /// single field, are returned unchanged.
    #[must_use]
    pub fn at(self, source: FieldSource, key: impl Into<String>) -> Self {
        match self {
            Self::ConversionError {
                value,
                target,
                field: None,
            } => Self::ConversionError {
                value,
                target,
                field: Some(FieldRef::new(source, key)),
            },
            Self::UnsupportedType {
                type_name,
                field: None,
            } => Self::UnsupportedType {
                type_name,
                field: Some(FieldRef::new(source, key)),
            },
            other => other,
        }
    }

    /// Returns the field this error belongs to, if any.
    #[must_use]
    pub fn field(&self) -> Option<&FieldRef> {
        match self {
            Self::MissingRequiredField { field } => Some(field),
            Self::ConversionError { field, .. } | Self::UnsupportedType { field, .. } => {
                field.as_ref()
            }
            Self::UnsupportedContentType { .. } | Self::PayloadDecodeError { .. } => None,
        }
    }

    /// Returns the HTTP status code for this error.
    ///
    /// Every validation failure is a client error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MissingRequiredField { .. } => "MISSING_REQUIRED_FIELD",
            Self::ConversionError { .. } => "CONVERSION_ERROR",
            Self::UnsupportedType { .. } => "UNSUPPORTED_TYPE",
            Self::UnsupportedContentType { .. } => "UNSUPPORTED_CONTENT_TYPE",
            Self::PayloadDecodeError { .. } => "PAYLOAD_DECODE_ERROR",
        }
    }

    /// Converts this error to a serializable error envelope.
    #[must_use]
    pub fn to_envelope(&self) -> ErrorEnvelope {
        let field = self.field();
        ErrorEnvelope {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
                source: field.map(|f| f.source),
                field: field.map(|f| f.key.clone()),
            },
        }
    }
}

/// Serializes as the [`ErrorDetail`] of the envelope.
impl Serialize for CheckError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_envelope().error.serialize(serializer)
    }
}

/// Serializable error envelope for HTTP responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// The error details.
    pub error: ErrorDetail,
}

/// Error detail within an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Part of the request the failing field was read from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<FieldSource>,
    /// Key of the failing field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}
