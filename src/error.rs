//! Error taxonomy for the invocation contract.
//!
//! Three kinds are recoverable and always resolve to an [`Envelope`]:
//! a malformed payload, a failed validation and an unknown route. They are
//! grouped under [`Rejection`]. The fourth kind, [`InternalFault`], is the only
//! one that leaves a function through the error channel of its entry point.

use crate::envelope::{Envelope, StatusCode};
use crate::validation::ValidationFailure;
use thiserror::Error;

/// Message used when the invocation argument is not a mapping.
pub const INVALID_PAYLOAD_MESSAGE: &str = "Invalid payload format";

/// A recoverable failure that is answered with an error envelope.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Rejection {
    /// The invocation argument is not a mapping.
    #[error("{}", INVALID_PAYLOAD_MESSAGE)]
    MalformedPayload,

    /// A required body field is missing, null or of the wrong type.
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    /// No handler is registered under the requested route.
    #[error("Route '{route}' not found")]
    RouteNotFound {
        /// The route that was requested.
        route: String,
        /// Every registered route, in registration order.
        available: Vec<String>,
    },
}

impl Rejection {
    /// Status code the rejection is answered with.
    pub fn status(&self) -> StatusCode {
        match self {
            Rejection::MalformedPayload | Rejection::Validation(_) => StatusCode::BAD_REQUEST,
            Rejection::RouteNotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    /// Convert the rejection into its error envelope.
    pub fn into_envelope(self) -> Envelope {
        match self {
            Rejection::MalformedPayload => {
                Envelope::error(StatusCode::BAD_REQUEST, INVALID_PAYLOAD_MESSAGE)
            }
            Rejection::Validation(failure) => failure.into_envelope(),
            Rejection::RouteNotFound { route, available } => {
                let mut data = serde_json::Map::new();
                data.insert("state".to_string(), false.into());
                data.insert(
                    "error".to_string(),
                    format!("Route '{}' not found", route).into(),
                );
                data.insert("available_routes".to_string(), available.into());
                Envelope::passthrough(StatusCode::NOT_FOUND, data.into())
            }
        }
    }
}

impl From<Rejection> for Envelope {
    fn from(rejection: Rejection) -> Self {
        rejection.into_envelope()
    }
}

/// An unexpected, non-recoverable fault inside a function.
///
/// Never encoded as an envelope: the harness answers it with a 500-class
/// response whatever else the function produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("internal fault: {message}")]
pub struct InternalFault {
    message: String,
}

impl InternalFault {
    /// Create a new fault.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build a fault from a caught panic payload.
    pub fn from_panic(payload: &(dyn std::any::Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        Self::new(format!("function panicked: {}", message))
    }

    /// The fault description.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<serde_json::Error> for InternalFault {
    fn from(err: serde_json::Error) -> Self {
        InternalFault::new(err.to_string())
    }
}

/// Errors raised while assembling dispatch tables and function registries.
///
/// These only occur at startup, before any invocation is served.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A route name was registered twice on one dispatcher.
    #[error("route '{0}' is already registered")]
    DuplicateRoute(String),

    /// A route name is empty or spans more than one path segment.
    #[error("route '{0}' is not a single path segment")]
    InvalidRoute(String),

    /// A function name was registered twice on one registry.
    #[error("function '{0}' is already registered")]
    DuplicateFunction(String),

    /// No function is registered under the given name.
    #[error("function '{0}' not found")]
    FunctionNotFound(String),
}
