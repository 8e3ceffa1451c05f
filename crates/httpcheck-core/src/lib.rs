//! # httpcheck Core
//!
//! Core types for the httpcheck request validator.
//!
//! This crate provides the building blocks shared by the extractors and the
//! validation orchestrator:
//!
//! - [`Schema`] / [`FieldSpec`] / [`FieldType`] - Declared fields of an API route
//! - [`RawValue`] - Untyped value as it arrives from the request
//! - [`TypedValue`] - Normalized value produced by coercion
//! - [`coerce`] - The type coercer
//! - [`CheckError`] - Client-side validation errors
//!
//! ## Example
//!
//! ```
//! use httpcheck_core::{coerce, FieldType, RawValue, TypedValue};
//!
//! let value = coerce(FieldType::Int, &RawValue::from("42")).unwrap();
//! assert_eq!(value, TypedValue::Int(42));
//!
//! // Floats headed for an integer field are rounded first
//! let value = coerce(FieldType::Int, &RawValue::Float(3.7)).unwrap();
//! assert_eq!(value, TypedValue::Int(4));
//! ```

#![doc(html_root_url = "https://docs.rs/httpcheck-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod coerce;
mod error;
pub mod schema;
mod value;

pub use coerce::{coerce, coerce_named};
pub use error::{CheckError, CheckResult, ErrorDetail, ErrorEnvelope, FieldRef, FieldSource};
pub use schema::{FieldSpec, FieldType, Schema, SchemaBuilder};
pub use value::{RawValue, TypedValue};
