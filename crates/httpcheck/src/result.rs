//! The outcome of checking one request.

use http::StatusCode;
use httpcheck_core::{CheckError, CheckResult, FieldSource, TypedValue};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// Coerced values of one request section, keyed by declared field key in
/// declaration order. `None` marks a declared field that was absent.
pub type FieldValues = IndexMap<String, Option<TypedValue>>;

/// Result of checking a request against a schema.
///
/// On success every declared field has an entry in its section. On failure
/// the sections hold the fields checked before the first error, and
/// [`error`](Self::error) says what went wrong.
///
/// Serializes as `{"status": 200, "params": {..}, "queries": {..},
/// "payload": {..}}`, with an `"error"` detail on failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    /// `200 OK` on success, `400 Bad Request` otherwise.
    #[serde(serialize_with = "serialize_status")]
    pub status: StatusCode,
    /// Coerced path parameters.
    pub params: FieldValues,
    /// Coerced query parameters.
    pub queries: FieldValues,
    /// Coerced payload fields (empty unless the payload was checked).
    pub payload: FieldValues,
    /// The first error, on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CheckError>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self {
            status: StatusCode::OK,
            params: FieldValues::new(),
            queries: FieldValues::new(),
            payload: FieldValues::new(),
            error: None,
        }
    }
}

impl ValidationResult {
    pub(crate) fn reject(&mut self, error: CheckError) {
        self.status = error.status_code();
        self.error = Some(error);
    }

    pub(crate) fn values_mut(&mut self, source: FieldSource) -> &mut FieldValues {
        match source {
            FieldSource::Params => &mut self.params,
            FieldSource::Queries => &mut self.queries,
            FieldSource::Payload => &mut self.payload,
        }
    }

    /// Returns `true` if every stage passed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Returns the error, if the check failed.
    #[must_use]
    pub fn error(&self) -> Option<&CheckError> {
        self.error.as_ref()
    }

    /// Returns the values of one section.
    #[must_use]
    pub fn values(&self, source: FieldSource) -> &FieldValues {
        match source {
            FieldSource::Params => &self.params,
            FieldSource::Queries => &self.queries,
            FieldSource::Payload => &self.payload,
        }
    }

    /// Returns the coerced value of a declared field.
    ///
    /// `None` if the field is undeclared, was absent, or was not reached.
    #[must_use]
    pub fn get(&self, source: FieldSource, key: &str) -> Option<&TypedValue> {
        self.values(source).get(key).and_then(Option::as_ref)
    }

    /// Converts into a `Result`, yielding the error on failure.
    ///
    /// # Errors
    ///
    /// Returns the first [`CheckError`] if the check failed.
    pub fn into_result(self) -> CheckResult<Self> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self),
        }
    }
}

fn serialize_status<S: Serializer>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u16(status.as_u16())
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpcheck_core::FieldType;
    use serde_json::json;

    #[test]
    fn test_default_is_success() {
        let result = ValidationResult::default();

        assert!(result.is_success());
        assert_eq!(result.status, StatusCode::OK);
        assert!(result.params.is_empty());
        assert!(result.into_result().is_ok());
    }

    #[test]
    fn test_reject() {
        let mut result = ValidationResult::default();
        result.reject(CheckError::missing(FieldSource::Queries, "page"));

        assert!(!result.is_success());
        assert_eq!(result.status, StatusCode::BAD_REQUEST);
        assert_eq!(result.error().map(CheckError::error_code), Some("MISSING_REQUIRED_FIELD"));

        let err = result.into_result().unwrap_err();
        assert_eq!(err, CheckError::missing(FieldSource::Queries, "page"));
    }

    #[test]
    fn test_get_flattens_absent_values() {
        let mut result = ValidationResult::default();
        result
            .values_mut(FieldSource::Queries)
            .insert("page".into(), Some(TypedValue::Int(2)));
        result
            .values_mut(FieldSource::Queries)
            .insert("sort".into(), None);

        assert_eq!(result.get(FieldSource::Queries, "page"), Some(&TypedValue::Int(2)));
        assert_eq!(result.get(FieldSource::Queries, "sort"), None);
        assert!(result.queries.contains_key("sort"));
        assert!(!result.queries.contains_key("other"));
    }

    #[test]
    fn test_serialize_success() {
        let mut result = ValidationResult::default();
        result.params.insert("id".into(), Some(TypedValue::Int(7)));
        result.queries.insert("q".into(), None);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            json!({
                "status": 200,
                "params": {"id": 7},
                "queries": {"q": null},
                "payload": {}
            })
        );
    }

    #[test]
    fn test_serialize_failure() {
        let mut result = ValidationResult::default();
        result.reject(
            CheckError::conversion("abc", FieldType::Int).at(FieldSource::Params, "id"),
        );

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], 400);
        assert_eq!(json["error"]["code"], "CONVERSION_ERROR");
        assert_eq!(json["error"]["field"], "id");
        assert_eq!(json["error"]["source"], "params");
    }
}
