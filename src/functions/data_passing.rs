//! Reads loosely typed event data and echoes the received body.

use crate::envelope::{Envelope, StatusCode};
use crate::error::InternalFault;
use crate::function::ShsfFunction;
use crate::invocation::{serve, Request};
use crate::routing::RouteHandler;
use serde_json::{json, Value};
use tracing::info;

/// Summarizes `event` and `user` from the body; never fails on missing data.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataPassingFunction;

impl RouteHandler for DataPassingFunction {
    fn handle(&self, request: &Request) -> Result<Envelope, InternalFault> {
        let body = request.body();
        let event = body.str_or("event", "unknown");
        let user_name = body.path_str_or(&["user", "name"], "Guest");
        let user_email = body.path_str_or(&["user", "email"], "N/A");

        info!(event, user = user_name, email = user_email, "Received event data");

        Ok(Envelope::passthrough(
            StatusCode::OK,
            json!({
                "message": format!("Processed {} event for {}", event, user_name),
                "received_data": body.to_value(),
            }),
        ))
    }
}

impl ShsfFunction for DataPassingFunction {
    fn invoke(&self, arg: &Value) -> Result<Envelope, InternalFault> {
        serve(arg, self)
    }

    fn name(&self) -> &str {
        "data-passing"
    }
}
