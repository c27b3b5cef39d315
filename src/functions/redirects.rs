//! Permanent and temporary redirects chosen by the request body.

use crate::envelope::Envelope;
use crate::error::InternalFault;
use crate::function::ShsfFunction;
use crate::invocation::{serve, Request};
use crate::routing::RouteHandler;
use serde_json::Value;

const DEFAULT_TARGET: &str = "https://example.com";

/// Redirects to `body.target`; `body.type == "permanent"` selects 301.
#[derive(Debug, Clone, Copy, Default)]
pub struct RedirectsFunction;

impl RouteHandler for RedirectsFunction {
    fn handle(&self, request: &Request) -> Result<Envelope, InternalFault> {
        let body = request.body();
        let target = body.str_or("target", DEFAULT_TARGET);
        let permanent = body.str_or("type", "temporary") == "permanent";
        Ok(Envelope::redirect(target, permanent))
    }
}

impl ShsfFunction for RedirectsFunction {
    fn invoke(&self, arg: &Value) -> Result<Envelope, InternalFault> {
        serve(arg, self)
    }

    fn name(&self) -> &str {
        "redirects"
    }
}
