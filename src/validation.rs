//! Required-field validation for handler bodies.
//!
//! A [`Validator`] is declared per handler with the fields it cannot do
//! without. Optional fields are never validated; handlers read them through
//! the defaulted accessors on [`RequestBody`].

use crate::envelope::{Envelope, StatusCode};
use crate::invocation::RequestBody;
use serde_json::Value;
use thiserror::Error;

/// Header name used for validation diagnostics by the bundled functions.
pub const DIAGNOSTIC_HEADER: &str = "X-Custom-Header";

/// What counts as "present" for a required field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Key present and not null. Empty strings pass.
    Present,
    /// Present and a string.
    String,
    /// A string other than `""`. Whitespace counts as content.
    NonEmptyString,
}

impl FieldRule {
    fn accepts(&self, value: Option<&Value>) -> bool {
        match (self, value) {
            (_, None) | (_, Some(Value::Null)) => false,
            (FieldRule::Present, Some(_)) => true,
            (FieldRule::String, Some(v)) => v.is_string(),
            (FieldRule::NonEmptyString, Some(v)) => v.as_str().is_some_and(|s| !s.is_empty()),
        }
    }
}

/// A required field that did not satisfy its rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationFailure {
    field: String,
    message: String,
    header: Option<(String, String)>,
}

impl ValidationFailure {
    /// Name of the field that failed.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Message reported in the error body.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The 400 envelope, with the diagnostic header when one was configured.
    pub fn into_envelope(self) -> Envelope {
        let envelope = Envelope::error(StatusCode::BAD_REQUEST, self.message);
        match self.header {
            Some((name, value)) => envelope.with_header(name, value),
            None => envelope,
        }
    }
}

/// Ordered list of required fields and how failures are reported.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    rules: Vec<(String, FieldRule)>,
    message: Option<String>,
    failure_header: Option<(String, String)>,
}

impl Validator {
    /// Create a validator with no rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field` to be present and non-null.
    pub fn require(self, field: impl Into<String>) -> Self {
        self.rule(field, FieldRule::Present)
    }

    /// Require `field` to be a string.
    pub fn require_string(self, field: impl Into<String>) -> Self {
        self.rule(field, FieldRule::String)
    }

    /// Require `field` to be a string other than `""`.
    pub fn require_non_empty(self, field: impl Into<String>) -> Self {
        self.rule(field, FieldRule::NonEmptyString)
    }

    /// Require `field` under an explicit rule.
    pub fn rule(mut self, field: impl Into<String>, rule: FieldRule) -> Self {
        self.rules.push((field.into(), rule));
        self
    }

    /// Report every failure with this message instead of `Missing {field} in request`.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach a diagnostic header to failure envelopes.
    pub fn failure_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.failure_header = Some((name.into(), value.into()));
        self
    }

    /// Check the rules in declaration order, stopping at the first failure.
    pub fn check(&self, body: &RequestBody) -> Result<(), ValidationFailure> {
        for (field, rule) in &self.rules {
            if !rule.accepts(body.as_map().get(field)) {
                let message = self
                    .message
                    .clone()
                    .unwrap_or_else(|| format!("Missing {} in request", field));
                return Err(ValidationFailure {
                    field: field.clone(),
                    message,
                    header: self.failure_header.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> RequestBody {
        RequestBody::from_value(Some(&value))
    }

    #[test]
    fn test_present_rule() {
        let validator = Validator::new().require("required_field");
        assert!(validator.check(&body(json!({"required_field": "x"}))).is_ok());
        assert!(validator.check(&body(json!({"required_field": ""}))).is_ok());
        assert!(validator.check(&body(json!({"required_field": 0}))).is_ok());

        let failure = validator
            .check(&body(json!({"required_field": null})))
            .unwrap_err();
        assert_eq!(failure.field(), "required_field");
        assert_eq!(failure.message(), "Missing required_field in request");
        assert!(validator.check(&body(json!({}))).is_err());
    }

    #[test]
    fn test_string_rules() {
        let validator = Validator::new().require_string("a").require_non_empty("b");
        assert!(validator.check(&body(json!({"a": "", "b": "x"}))).is_ok());

        let failure = validator.check(&body(json!({"a": 1, "b": "x"}))).unwrap_err();
        assert_eq!(failure.field(), "a");

        let failure = validator.check(&body(json!({"a": "", "b": ""}))).unwrap_err();
        assert_eq!(failure.field(), "b");

        let failure = validator.check(&body(json!({"a": "", "b": false}))).unwrap_err();
        assert_eq!(failure.field(), "b");
    }

    #[test]
    fn test_whitespace_counts_as_content() {
        let validator = Validator::new().require_non_empty("username");
        assert!(validator.check(&body(json!({"username": " "}))).is_ok());
        assert!(validator.check(&body(json!({"username": "\t\n"}))).is_ok());
    }

    #[test]
    fn test_first_failure_wins() {
        let validator = Validator::new()
            .require_non_empty("username")
            .require_non_empty("email")
            .message("Username and email are required");
        let failure = validator.check(&body(json!({}))).unwrap_err();
        assert_eq!(failure.field(), "username");
        assert_eq!(failure.to_string(), "Username and email are required");
    }

    #[test]
    fn test_failure_envelope_carries_header() {
        let validator = Validator::new()
            .require("required_field")
            .failure_header(DIAGNOSTIC_HEADER, "validation-failed");
        let envelope = validator.check(&body(json!({}))).unwrap_err().into_envelope();

        assert_eq!(envelope.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            envelope.body(),
            Some(&json!({"state": false, "error": "Missing required_field in request"}))
        );
        assert_eq!(envelope.headers()[DIAGNOSTIC_HEADER], "validation-failed");
    }
}
