//! Custom status codes and headers driven by one required field.

use crate::envelope::{Envelope, StatusCode};
use crate::error::InternalFault;
use crate::function::ShsfFunction;
use crate::invocation::{serve, Request};
use crate::routing::RouteHandler;
use crate::validation::{Validator, DIAGNOSTIC_HEADER};
use serde_json::{Map, Value};

const REQUIRED_FIELD: &str = "required_field";

/// Answers 400 without `required_field`, 200 echoing it otherwise.
#[derive(Debug)]
pub struct CustomResponsesFunction {
    validator: Validator,
}

impl CustomResponsesFunction {
    /// Create the function with its validator.
    pub fn new() -> Self {
        Self {
            validator: Validator::new()
                .require(REQUIRED_FIELD)
                .failure_header(DIAGNOSTIC_HEADER, "validation-failed"),
        }
    }
}

impl Default for CustomResponsesFunction {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteHandler for CustomResponsesFunction {
    fn handle(&self, request: &Request) -> Result<Envelope, InternalFault> {
        if let Err(failure) = self.validator.check(request.body()) {
            return Ok(failure.into_envelope());
        }

        let mut data = Map::new();
        data.insert(
            "message".to_string(),
            "Request processed successfully".into(),
        );
        data.insert(
            "data".to_string(),
            request.body().get(REQUIRED_FIELD).cloned().unwrap_or_default(),
        );
        Ok(Envelope::success(StatusCode::OK, data)
            .with_header(DIAGNOSTIC_HEADER, "validation-success"))
    }
}

impl ShsfFunction for CustomResponsesFunction {
    fn invoke(&self, arg: &Value) -> Result<Envelope, InternalFault> {
        serve(arg, self)
    }

    fn name(&self) -> &str {
        "custom-responses"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_field() {
        let envelope = CustomResponsesFunction::new().invoke(&json!({"body": {}})).unwrap();
        assert_eq!(envelope.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            envelope.body(),
            Some(&json!({"state": false, "error": "Missing required_field in request"}))
        );
        assert_eq!(envelope.headers()["X-Custom-Header"], "validation-failed");
    }

    #[test]
    fn test_null_field_counts_as_missing() {
        let envelope = CustomResponsesFunction::new()
            .invoke(&json!({"body": {"required_field": null}}))
            .unwrap();
        assert_eq!(envelope.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_present_field() {
        let envelope = CustomResponsesFunction::new()
            .invoke(&json!({"body": {"required_field": "x"}}))
            .unwrap();
        assert_eq!(envelope.status(), StatusCode::OK);
        assert_eq!(
            envelope.body(),
            Some(&json!({
                "state": true,
                "message": "Request processed successfully",
                "data": "x",
            }))
        );
        assert_eq!(envelope.headers()["X-Custom-Header"], "validation-success");
    }

    #[test]
    fn test_structured_field_is_echoed() {
        let envelope = CustomResponsesFunction::new()
            .invoke(&json!({"body": {"required_field": {"n": [1, 2]}}}))
            .unwrap();
        assert_eq!(envelope.body().unwrap()["data"], json!({"n": [1, 2]}));
    }
}
