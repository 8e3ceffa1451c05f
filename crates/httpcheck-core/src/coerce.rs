//! Type coercion.
//!
//! Coercion happens in two steps. The raw value is first rendered to text
//! according to its kind, then the text is parsed as the declared type.
//! Rendering floats is lossy on purpose: a float headed for an `int` field
//! is rendered with no decimals (so `3.7` becomes `"4"`), and a float headed
//! anywhere else is rendered with two.

use crate::{CheckError, CheckResult, FieldType, RawValue, TypedValue};
use std::borrow::Cow;

/// Coerces `raw` into `target`.
///
/// # Errors
///
/// - [`CheckError::UnsupportedType`] for an object or array supplied to a
///   field other than `map`.
/// - [`CheckError::ConversionError`] when the rendered value does not parse
///   as `target` (a JSON `null` never does).
///
/// # Example
///
/// ```
/// use httpcheck_core::{coerce, FieldType, RawValue, TypedValue};
///
/// assert_eq!(
///     coerce(FieldType::Bool, &RawValue::from("T")).unwrap(),
///     TypedValue::Bool(true)
/// );
/// assert!(coerce(FieldType::Int, &RawValue::from("ten")).is_err());
/// ```
pub fn coerce(target: FieldType, raw: &RawValue) -> CheckResult<TypedValue> {
    let rendered = render(target, raw)?;

    match target {
        FieldType::Int => rendered
            .parse::<i64>()
            .map(TypedValue::Int)
            .map_err(|_| CheckError::conversion(rendered.to_string(), target)),
        FieldType::Float => rendered
            .parse::<f64>()
            .map(TypedValue::Float)
            .map_err(|_| CheckError::conversion(rendered.to_string(), target)),
        FieldType::Bool => parse_bool(&rendered)
            .map(TypedValue::Bool)
            .ok_or_else(|| CheckError::conversion(rendered.to_string(), target)),
        FieldType::String | FieldType::Map | FieldType::Empty => {
            Ok(TypedValue::Text(rendered.into_owned()))
        }
    }
}

/// Coerces `raw` into the type named `type_name`.
///
/// # Errors
///
/// Returns [`CheckError::UnsupportedType`] if `type_name` is unknown, and
/// otherwise the errors of [`coerce`].
pub fn coerce_named(type_name: &str, raw: &RawValue) -> CheckResult<TypedValue> {
    coerce(type_name.parse()?, raw)
}

fn render(target: FieldType, raw: &RawValue) -> CheckResult<Cow<'_, str>> {
    let rendered = match raw {
        RawValue::Integer(i) => Cow::Owned(i.to_string()),
        RawValue::Bool(b) => Cow::Owned(b.to_string()),
        RawValue::Float(f) if target == FieldType::Int => Cow::Owned(format!("{f:.0}")),
        RawValue::Float(f) => Cow::Owned(format!("{f:.2}")),
        RawValue::String(s) => Cow::Borrowed(s.as_str()),
        RawValue::Composite(value) if target == FieldType::Map => Cow::Owned(
            serde_json::to_string(value)
                .map_err(|_| CheckError::conversion(raw.kind(), target))?,
        ),
        RawValue::Composite(_) => return Err(CheckError::composite_for(target)),
        RawValue::Null => return Err(CheckError::conversion("null", target)),
    };

    Ok(rendered)
}

// Accepts the usual textual spellings; anything else is a conversion error.
fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
