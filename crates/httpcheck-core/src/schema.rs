//! Declared fields of an API route.
//!
//! A [`Schema`] lists the path parameters, query parameters and payload keys
//! a route accepts. Each entry is a [`FieldSpec`] naming the key, the
//! [`FieldType`] its value is coerced to, and whether it may be absent.
//!
//! Schemas are produced elsewhere (typically by an annotation parser) and
//! arrive as JSON:
//!
//! ```
//! use httpcheck_core::{FieldType, Schema};
//!
//! let schema = Schema::from_json_str(r#"{
//!     "params":  [{"key": "userId", "type": "int"}],
//!     "queries": [{"key": "verbose", "type": "bool", "nullable": true}],
//!     "payload": [{"key": "name", "type": "string"}]
//! }"#).unwrap();
//!
//! assert_eq!(schema.params()[0].field_type(), FieldType::Int);
//! assert!(schema.queries()[0].is_nullable());
//! assert!(schema.has_payload());
//! ```
//!
//! Or they can be built in code:
//!
//! ```
//! use httpcheck_core::{FieldSpec, FieldType, Schema};
//!
//! let schema = Schema::builder()
//!     .param(FieldSpec::required("userId", FieldType::Int))
//!     .query(FieldSpec::nullable("page", FieldType::Int))
//!     .build();
//!
//! assert_eq!(schema.params().len(), 1);
//! assert!(!schema.has_payload());
//! ```

use crate::{CheckError, FieldSource};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target type of a declared field.
///
/// Schemas name types with strings (`"int"`, `"float64"`, `"bool"`,
/// `"string"`, `"map"`, `"empty"`); they are parsed into this enum as soon
/// as the schema is read. Parsing is case-insensitive and `"float"` is
/// accepted as an alias for `"float64"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FieldType {
    /// 64-bit signed integer.
    Int,
    /// 64-bit floating point.
    Float,
    /// Boolean.
    Bool,
    /// Text, kept as-is.
    String,
    /// JSON object or array, kept as its JSON text.
    Map,
    /// Untyped text, kept as-is.
    Empty,
}

impl FieldType {
    /// Returns the canonical schema name of this type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float64",
            Self::Bool => "bool",
            Self::String => "string",
            Self::Map => "map",
            Self::Empty => "empty",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "int" => Ok(Self::Int),
            "float64" | "float" => Ok(Self::Float),
            "bool" => Ok(Self::Bool),
            "string" => Ok(Self::String),
            "map" => Ok(Self::Map),
            "empty" => Ok(Self::Empty),
            _ => Err(CheckError::unsupported_type(s)),
        }
    }
}

impl TryFrom<String> for FieldType {
    type Error = CheckError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FieldType> for String {
    fn from(value: FieldType) -> Self {
        value.as_str().to_string()
    }
}

/// A single declared field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    key: String,
    #[serde(rename = "type")]
    field_type: FieldType,
    #[serde(default)]
    nullable: bool,
}

impl FieldSpec {
    /// Creates a field that must be present.
    #[must_use]
    pub fn required(key: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            key: key.into(),
            field_type,
            nullable: false,
        }
    }

    /// Creates a field that may be absent.
    #[must_use]
    pub fn nullable(key: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            key: key.into(),
            field_type,
            nullable: true,
        }
    }

    /// Creates a field from a schema type name.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::UnsupportedType`] if `type_name` is unknown.
    pub fn parse(
        key: impl Into<String>,
        type_name: &str,
        nullable: bool,
    ) -> Result<Self, CheckError> {
        let key = key.into();
        let field_type = type_name.parse::<FieldType>()?;
        Ok(Self {
            key,
            field_type,
            nullable,
        })
    }

    /// Returns the declared key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the target type.
    #[must_use]
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Returns `true` if the field may be absent.
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}

/// Declared params, queries and payload fields of one route.
///
/// Immutable once built and safe to share between concurrent checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Schema {
    #[serde(default)]
    params: Vec<FieldSpec>,
    #[serde(default)]
    queries: Vec<FieldSpec>,
    #[serde(default)]
    payload: Vec<FieldSpec>,
}

impl Schema {
    /// Creates a new schema builder.
    #[must_use]
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Parses a schema from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or names an unknown type.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Returns the declared path parameters.
    #[must_use]
    pub fn params(&self) -> &[FieldSpec] {
        &self.params
    }

    /// Returns the declared query parameters.
    #[must_use]
    pub fn queries(&self) -> &[FieldSpec] {
        &self.queries
    }

    /// Returns the declared payload keys.
    #[must_use]
    pub fn payload(&self) -> &[FieldSpec] {
        &self.payload
    }

    /// Returns the fields declared for `source`.
    #[must_use]
    pub fn fields(&self, source: FieldSource) -> &[FieldSpec] {
        match source {
            FieldSource::Params => &self.params,
            FieldSource::Queries => &self.queries,
            FieldSource::Payload => &self.payload,
        }
    }

    /// Returns `true` if at least one payload field is declared.
    #[must_use]
    pub fn has_payload(&self) -> bool {
        !self.payload.is_empty()
    }
}

/// Builder for [`Schema`].
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    /// Adds a path parameter.
    #[must_use]
    pub fn param(mut self, field: FieldSpec) -> Self {
        self.schema.params.push(field);
        self
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn query(mut self, field: FieldSpec) -> Self {
        self.schema.queries.push(field);
        self
    }

    /// Adds a payload key.
    #[must_use]
    pub fn payload(mut self, field: FieldSpec) -> Self {
        self.schema.payload.push(field);
        self
    }

    /// Builds the schema.
    #[must_use]
    pub fn build(self) -> Schema {
        self.schema
    }
}
