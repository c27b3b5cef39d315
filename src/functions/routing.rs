//! Multi-route function: `register`, `login`, `profile` and `default`.

use crate::envelope::{Envelope, StatusCode};
use crate::error::{InternalFault, RegistryError};
use crate::function::ShsfFunction;
use crate::invocation::Request;
use crate::routing::Dispatcher;
use crate::validation::Validator;
use serde_json::{json, Map, Value};

/// Serves four flat routes from one entry point.
#[derive(Debug)]
pub struct RoutingFunction {
    dispatcher: Dispatcher,
}

impl RoutingFunction {
    /// Build the function and its route table.
    pub fn new() -> Result<Self, RegistryError> {
        let dispatcher = Dispatcher::builder()
            .route("register", handle_register)
            .route("login", handle_login)
            .route("profile", handle_profile)
            .route("default", handle_default)
            .build()?;
        Ok(Self { dispatcher })
    }

    /// Registered route names, in declaration order.
    pub fn routes(&self) -> &[String] {
        self.dispatcher.routes()
    }
}

impl ShsfFunction for RoutingFunction {
    fn invoke(&self, arg: &Value) -> Result<Envelope, InternalFault> {
        self.dispatcher.invoke(arg)
    }

    fn name(&self) -> &str {
        "routing"
    }
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn handle_register(request: &Request) -> Result<Envelope, InternalFault> {
    let validator = Validator::new()
        .require_non_empty("username")
        .require_non_empty("email")
        .message("Username and email are required");
    if let Err(failure) = validator.check(request.body()) {
        return Ok(failure.into_envelope());
    }

    let username = request.body().str_or("username", "");
    Ok(Envelope::success(
        StatusCode::OK,
        object(json!({
            "message": format!("User {} registered successfully", username),
            "route": "register",
        })),
    ))
}

fn handle_login(request: &Request) -> Result<Envelope, InternalFault> {
    let username = request.body().str_or("username", "");
    Ok(Envelope::success(
        StatusCode::OK,
        object(json!({
            "message": format!("User {} logged in", username),
            "route": "login",
            "token": "example-auth-token",
        })),
    ))
}

fn handle_profile(_request: &Request) -> Result<Envelope, InternalFault> {
    Ok(Envelope::success(
        StatusCode::OK,
        object(json!({
            "route": "profile",
            "user": {
                "username": "example_user",
                "email": "user@example.com",
            },
        })),
    ))
}

fn handle_default(_request: &Request) -> Result<Envelope, InternalFault> {
    Ok(Envelope::success(
        StatusCode::OK,
        object(json!({
            "message": "Welcome to the API",
            "routes": {
                "/register": "POST - Register a new user",
                "/login": "POST - Login a user",
                "/profile": "GET - Get user profile",
                "/": "GET - This message",
            },
        })),
    ))
}
