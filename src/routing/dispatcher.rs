//! Route dispatcher built once at startup.

use crate::envelope::Envelope;
use crate::error::{InternalFault, RegistryError, Rejection};
use crate::invocation::{Request, Route};
use crate::routing::RouteHandler;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Collects route registrations before the dispatch table is frozen.
#[derive(Default)]
pub struct DispatcherBuilder {
    routes: Vec<(String, Box<dyn RouteHandler>)>,
}

impl DispatcherBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `name`.
    pub fn route(mut self, name: impl Into<String>, handler: impl RouteHandler + 'static) -> Self {
        self.routes.push((name.into(), Box::new(handler)));
        self
    }

    /// Freeze the table. Fails on duplicate or multi-segment route names.
    pub fn build(self) -> Result<Dispatcher, RegistryError> {
        let mut index = HashMap::with_capacity(self.routes.len());
        let mut names = Vec::with_capacity(self.routes.len());
        let mut handlers = Vec::with_capacity(self.routes.len());

        for (name, handler) in self.routes {
            if !Route::is_single_segment(&name) {
                return Err(RegistryError::InvalidRoute(name));
            }
            if index.contains_key(&name) {
                return Err(RegistryError::DuplicateRoute(name));
            }
            index.insert(name.clone(), handlers.len());
            names.push(name);
            handlers.push(handler);
        }

        Ok(Dispatcher {
            index,
            names,
            handlers,
        })
    }
}

/// Maps route names to handlers by exact match.
pub struct Dispatcher {
    index: HashMap<String, usize>,
    names: Vec<String>,
    handlers: Vec<Box<dyn RouteHandler>>,
}

impl Dispatcher {
    /// Start declaring routes.
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    /// Registered route names in registration order.
    pub fn routes(&self) -> &[String] {
        &self.names
    }

    /// Run the handler for the request's route, or answer 404.
    pub fn dispatch(&self, request: &Request) -> Result<Envelope, InternalFault> {
        let route = request.route().as_str();
        match self.index.get(route) {
            Some(&slot) => {
                debug!("Dispatching route '{}'", route);
                self.handlers[slot].handle(request)
            }
            None => {
                warn!("No handler for route '{}'", route);
                Ok(Rejection::RouteNotFound {
                    route: route.to_string(),
                    available: self.names.clone(),
                }
                .into_envelope())
            }
        }
    }

    /// Decode the invocation argument, then dispatch it.
    pub fn invoke(&self, arg: &Value) -> Result<Envelope, InternalFault> {
        match Request::decode(arg) {
            Ok(request) => self.dispatch(&request),
            Err(rejection) => {
                debug!("Rejected invocation: {}", rejection);
                Ok(rejection.into_envelope())
            }
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("routes", &self.names)
            .finish()
    }
}
