//! # SHSF - Serverless Function Invocation Contract
//!
//! `shsf` implements the convention by which a serverless function receives a
//! loosely typed invocation argument and answers with a structured response
//! envelope that the harness turns into an HTTP response.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                              Harness                                 │
//! │           (HTTP termination, auth, deployment, scaling)              │
//! └──────────────────────────────────────────────────────────────────────┘
//!            │ invocation argument                  ▲ envelope / fault
//!            ▼                                      │
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │  Decoder ──► Dispatcher ──► Validator ──► handler ──► Envelope       │
//! │  (invocation)  (routing)    (validation)              (envelope)     │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use shsf::prelude::*;
//! use serde_json::{json, Map};
//!
//! fn hello(request: &Request) -> Result<Envelope, InternalFault> {
//!     let name = request.body().str_or("name", "Guest");
//!     let mut data = Map::new();
//!     data.insert("message".to_string(), format!("Hello, {}!", name).into());
//!     Ok(Envelope::success(StatusCode::OK, data))
//! }
//!
//! let dispatcher = Dispatcher::builder()
//!     .route("hello", hello)
//!     .build()
//!     .unwrap();
//!
//! let envelope = dispatcher
//!     .invoke(&json!({"route": "hello", "body": {"name": "Ada"}}))
//!     .unwrap();
//! assert_eq!(envelope.status(), StatusCode::OK);
//! assert_eq!(envelope.body().unwrap()["message"], "Hello, Ada!");
//! ```
//!
//! ## Failure semantics
//!
//! Malformed payloads, failed validations and unknown routes all resolve to
//! well-formed envelopes (400, 400 and 404). Only an [`InternalFault`] leaves
//! a function through its error channel; the harness answers it with 500.
//!
//! The [`runtime`] module contains a small development host that serves
//! registered functions over HTTP.

pub mod envelope;
pub mod error;
pub mod function;
pub mod functions;
pub mod invocation;
pub mod routing;
pub mod runtime;
pub mod validation;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::envelope::{Envelope, StatusCode, PROTOCOL_VERSION};
    pub use crate::error::{InternalFault, RegistryError, Rejection};
    pub use crate::function::{FunctionManifest, FunctionRegistry, ShsfFunction};
    pub use crate::invocation::{serve, Request, RequestBody, Route};
    pub use crate::routing::{Dispatcher, RouteHandler};
    pub use crate::runtime::{HostConfig, HostServer};
    pub use crate::validation::{FieldRule, Validator};
    pub use shsf_macro::shsf_function;
}

// Re-export for convenience
pub use envelope::{Envelope, StatusCode};
pub use error::{InternalFault, Rejection};
pub use function::{FunctionRegistry, ShsfFunction};
pub use invocation::{Request, RequestBody};
pub use routing::Dispatcher;
pub use runtime::{HostConfig, HostServer};
