//! Query string parsing.
//!
//! Query strings are split on `&` and each pair on `=`. Keys are
//! lower-cased, values are kept verbatim (no case folding and no
//! percent-decoding). A key that appears more than once keeps its last
//! value.
//!
//! A key written without `=` (such as `flag` in `?flag&page=2`) is mapped to
//! its own key text by default. [`ValuelessKeyPolicy::Empty`] maps it to an
//! empty string instead.

use crate::{FieldLookup, RequestContext};
use serde::{Deserialize, Serialize};

/// How to represent a query key that has no `=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuelessKeyPolicy {
    /// `?flag` yields `flag = "flag"`.
    #[default]
    KeyAsValue,
    /// `?flag` yields `flag = ""`.
    Empty,
}

/// Parses the query part of a full URL.
///
/// Everything after the first `?` is the query string. A URL without `?`
/// yields an empty lookup.
///
/// # Example
///
/// ```rust
/// use httpcheck_extract::{parse_query, ValuelessKeyPolicy};
///
/// let queries = parse_query("/search?Q=Rust&limit=10&debug", ValuelessKeyPolicy::default());
///
/// assert_eq!(queries.get_or_empty("q"), "Rust");
/// assert_eq!(queries.get_or_empty("limit"), "10");
/// assert_eq!(queries.get_or_empty("debug"), "debug");
///
/// assert!(parse_query("/search", ValuelessKeyPolicy::default()).is_empty());
/// ```
#[must_use]
pub fn parse_query(url: &str, policy: ValuelessKeyPolicy) -> FieldLookup<String> {
    match url.split_once('?') {
        Some((_, query)) => parse_query_string(query, policy),
        None => FieldLookup::new(),
    }
}

/// Parses a bare query string (the part after `?`).
///
/// For a pair containing several `=`, the value is the text between the
/// first and the second one.
#[must_use]
pub fn parse_query_string(query: &str, policy: ValuelessKeyPolicy) -> FieldLookup<String> {
    let mut lookup = FieldLookup::new();

    for pair in query.split('&') {
        let mut parts = pair.split('=');
        let key = parts.next().unwrap_or_default();
        let value = match (parts.next(), policy) {
            (Some(value), _) => value,
            (None, ValuelessKeyPolicy::KeyAsValue) => key,
            (None, ValuelessKeyPolicy::Empty) => "",
        };
        lookup.insert(key, value.to_string());
    }

    lookup
}

/// Extracts the query parameters of a request.
#[must_use]
pub fn extract_queries(ctx: &RequestContext, policy: ValuelessKeyPolicy) -> FieldLookup<String> {
    ctx.query_string()
        .map(|query| parse_query_string(query, policy))
        .unwrap_or_default()
}
