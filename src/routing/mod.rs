//! Flat route dispatch.
//!
//! A route is one path segment. The dispatch table is assembled once with a
//! [`DispatcherBuilder`] and is read-only afterwards.

mod dispatcher;

pub use dispatcher::{Dispatcher, DispatcherBuilder};

use crate::envelope::Envelope;
use crate::error::InternalFault;
use crate::invocation::Request;

/// A routine that answers one route.
pub trait RouteHandler: Send + Sync {
    /// Handle a decoded request. Modeled failures are returned as envelopes;
    /// the error channel is for internal faults only.
    fn handle(&self, request: &Request) -> Result<Envelope, InternalFault>;
}

impl<F> RouteHandler for F
where
    F: Fn(&Request) -> Result<Envelope, InternalFault> + Send + Sync,
{
    fn handle(&self, request: &Request) -> Result<Envelope, InternalFault> {
        self(request)
    }
}
