//! Payload decoding: turns the opaque invocation argument into a [`Request`].
//!
//! Decoding only fails when the argument is not a mapping. Every other
//! irregularity (missing or mistyped `route`, `body`, `headers`) is resolved
//! with a default.

mod body;
mod route;

pub use body::RequestBody;
pub use route::{Route, DEFAULT_ROUTE};

use crate::envelope::Envelope;
use crate::error::{InternalFault, Rejection};
use crate::routing::RouteHandler;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Opaque per-call input supplied by the harness.
pub type InvocationArgument = Value;

/// The invocation argument, classified by shape.
#[derive(Debug, Clone, Copy)]
pub enum Invocation<'a> {
    /// The expected shape: a mapping with optional `route` and `body`.
    Mapping(&'a Map<String, Value>),
    /// Anything else.
    Other(&'a Value),
}

impl<'a> Invocation<'a> {
    /// Classify the raw argument.
    pub fn classify(arg: &'a Value) -> Self {
        match arg {
            Value::Object(map) => Invocation::Mapping(map),
            other => Invocation::Other(other),
        }
    }
}

/// Typed view of one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    route: Route,
    body: RequestBody,
    headers: BTreeMap<String, String>,
    queries: BTreeMap<String, String>,
    method: String,
}

impl Request {
    /// Decode the invocation argument.
    pub fn decode(arg: &Value) -> Result<Self, Rejection> {
        match Invocation::classify(arg) {
            Invocation::Mapping(map) => Ok(Self::from_mapping(map)),
            Invocation::Other(_) => Err(Rejection::MalformedPayload),
        }
    }

    fn from_mapping(map: &Map<String, Value>) -> Self {
        Self {
            route: Route::from_value(map.get("route")),
            body: RequestBody::from_value(map.get("body")),
            headers: string_map(map.get("headers"), true),
            queries: string_map(map.get("queries"), false),
            method: map
                .get("method")
                .and_then(Value::as_str)
                .unwrap_or("GET")
                .to_string(),
        }
    }

    /// Build a request directly, mainly for tests and in-process callers.
    pub fn new(route: Route, body: RequestBody) -> Self {
        Self {
            route,
            body,
            headers: BTreeMap::new(),
            queries: BTreeMap::new(),
            method: "GET".to_string(),
        }
    }

    /// The selected route.
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// The handler body, empty when absent or not a mapping.
    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// All string headers, with lowercased names.
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Get a query parameter.
    pub fn query(&self, name: &str) -> Option<&str> {
        self.queries.get(name).map(String::as_str)
    }

    /// The HTTP method, `GET` when not supplied.
    pub fn method(&self) -> &str {
        &self.method
    }
}

/// Collect the string entries of a mapping, skipping values of any other type.
fn string_map(value: Option<&Value>, lowercase_keys: bool) -> BTreeMap<String, String> {
    let Some(Value::Object(map)) = value else {
        return BTreeMap::new();
    };
    map.iter()
        .filter_map(|(k, v)| {
            let key = if lowercase_keys {
                k.to_ascii_lowercase()
            } else {
                k.clone()
            };
            v.as_str().map(|s| (key, s.to_string()))
        })
        .collect()
}

/// Decode `arg` and hand it to a single handler.
///
/// A malformed argument is answered with the 400 envelope without running
/// the handler.
pub fn serve<H>(arg: &Value, handler: &H) -> Result<Envelope, InternalFault>
where
    H: RouteHandler + ?Sized,
{
    match Request::decode(arg) {
        Ok(request) => handler.handle(&request),
        Err(rejection) => Ok(rejection.into_envelope()),
    }
}
