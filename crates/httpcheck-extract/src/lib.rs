//! # httpcheck Extract
//!
//! Raw input extraction for the httpcheck request validator.
//!
//! This crate turns an HTTP request into the three raw lookups a schema is
//! checked against. Nothing here coerces values; that is left to
//! [`httpcheck_core::coerce`].
//!
//! | Source | Function | Lookup |
//! |--------|----------|--------|
//! | Path parameters | [`RequestContext::path_params`] | `FieldLookup<String>` |
//! | Query string | [`extract_queries`] / [`parse_query`] | `FieldLookup<String>` |
//! | JSON body | [`extract_payload`] / [`decode_payload`] | `FieldLookup<RawValue>` |
//!
//! All lookups are case-insensitive on their keys.
//!
//! ## Example
//!
//! ```rust
//! use httpcheck_core::RawValue;
//! use httpcheck_extract::{extract_payload, extract_queries, RequestContextBuilder, ValuelessKeyPolicy};
//! use http::{Method, Uri};
//!
//! let ctx = RequestContextBuilder::new()
//!     .method(Method::POST)
//!     .uri(Uri::from_static("/users/42?notify=true"))
//!     .header("content-type", "application/json")
//!     .body(r#"{"name": "Alice"}"#)
//!     .path_param("userId", "42")
//!     .build();
//!
//! assert_eq!(ctx.path_params().get_or_empty("userid"), "42");
//!
//! let queries = extract_queries(&ctx, ValuelessKeyPolicy::default());
//! assert_eq!(queries.get_or_empty("notify"), "true");
//!
//! let payload = extract_payload(&ctx).unwrap();
//! assert_eq!(payload.get("name"), Some(&RawValue::from("Alice")));
//! ```
//!
//! [`httpcheck_core::coerce`]: httpcheck_core::coerce
//! [`RawValue`]: httpcheck_core::RawValue

#![doc(html_root_url = "https://docs.rs/httpcheck-extract/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod context;
mod lookup;
mod payload;
mod query;

pub use context::{RequestContext, RequestContextBuilder};
pub use lookup::FieldLookup;
pub use payload::{decode_payload, extract_payload, is_json_content_type, media_type, JSON_MEDIA_TYPE};
pub use query::{extract_queries, parse_query, parse_query_string, ValuelessKeyPolicy};
