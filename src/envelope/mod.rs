//! Response envelopes returned from every function invocation.
//!
//! All envelopes are built through the constructors on [`Envelope`], which
//! stamp the protocol version and keep body and redirect target exclusive.

mod builder;
mod status;
mod wire;

pub use builder::{Content, Envelope, PROTOCOL_VERSION};
pub use status::{InvalidStatusCode, StatusCode};
pub use wire::WireError;
