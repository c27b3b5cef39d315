//! Extra in-function check of the `x-secure-header` request header.

use crate::envelope::{Envelope, StatusCode};
use crate::error::InternalFault;
use crate::function::ShsfFunction;
use crate::invocation::{serve, Request};
use crate::routing::RouteHandler;
use serde_json::{Map, Value};

const SECURE_HEADER: &str = "x-secure-header";

/// Rejects requests without a non-empty `x-secure-header` with 403.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecureHeadersFunction;

impl RouteHandler for SecureHeadersFunction {
    fn handle(&self, request: &Request) -> Result<Envelope, InternalFault> {
        let authenticated = request
            .header(SECURE_HEADER)
            .is_some_and(|token| !token.is_empty());
        if !authenticated {
            return Ok(Envelope::error(
                StatusCode::FORBIDDEN,
                "Missing x-secure-header",
            ));
        }

        let mut data = Map::new();
        data.insert(
            "message".to_string(),
            "Secure request processed successfully".into(),
        );
        data.insert("data".to_string(), request.body().to_value());
        Ok(Envelope::success(StatusCode::OK, data))
    }
}

impl ShsfFunction for SecureHeadersFunction {
    fn invoke(&self, arg: &Value) -> Result<Envelope, InternalFault> {
        serve(arg, self)
    }

    fn name(&self) -> &str {
        "secure-headers"
    }
}
