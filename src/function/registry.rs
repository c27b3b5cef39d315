//! Function registry used by the development host.

use crate::envelope::Envelope;
use crate::error::{InternalFault, RegistryError};
use crate::function::handler::ShsfFunction;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

/// Per-function counters reported by [`FunctionRegistry::list`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionStats {
    pub name: String,
    pub invocations: u64,
    pub faults: u64,
}

/// Function entry in the registry.
struct FunctionEntry {
    function: Box<dyn ShsfFunction>,
    invocations: AtomicU64,
    faults: AtomicU64,
}

/// Registry of named functions.
///
/// Functions hold no per-invocation state, so the lock only guards the table
/// itself; invocations run concurrently on shared entries.
pub struct FunctionRegistry {
    functions: RwLock<HashMap<String, Arc<FunctionEntry>>>,
}

impl FunctionRegistry {
    /// Create a new function registry.
    pub fn new() -> Self {
        Self {
            functions: RwLock::new(HashMap::new()),
        }
    }

    /// Register a function under `name`.
    pub async fn register(
        &self,
        name: impl Into<String>,
        function: Box<dyn ShsfFunction>,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        let mut functions = self.functions.write().await;

        if functions.contains_key(&name) {
            return Err(RegistryError::DuplicateFunction(name));
        }

        let entry = FunctionEntry {
            function,
            invocations: AtomicU64::new(0),
            faults: AtomicU64::new(0),
        };
        functions.insert(name.clone(), Arc::new(entry));
        info!("Registered function: {}", name);
        Ok(())
    }

    /// Remove a function from the registry.
    pub async fn remove(&self, name: &str) -> Result<(), RegistryError> {
        let mut functions = self.functions.write().await;
        functions
            .remove(name)
            .ok_or_else(|| RegistryError::FunctionNotFound(name.to_string()))?;
        info!("Removed function: {}", name);
        Ok(())
    }

    /// Invoke a function.
    ///
    /// The outer result reports whether `name` is registered; the inner one is
    /// the function's own outcome. A panic inside the function is caught and
    /// reported as an [`InternalFault`].
    pub async fn execute(
        &self,
        name: &str,
        arg: &Value,
        request_id: &str,
    ) -> Result<Result<Envelope, InternalFault>, RegistryError> {
        let entry = {
            let functions = self.functions.read().await;
            functions
                .get(name)
                .cloned()
                .ok_or_else(|| RegistryError::FunctionNotFound(name.to_string()))?
        };

        entry.invocations.fetch_add(1, Ordering::Relaxed);
        debug!("Invoking function '{}' [{}]", name, request_id);

        let outcome = catch_unwind(AssertUnwindSafe(|| entry.function.invoke(arg)))
            .unwrap_or_else(|panic| Err(InternalFault::from_panic(&*panic)));

        if let Err(fault) = &outcome {
            entry.faults.fetch_add(1, Ordering::Relaxed);
            error!("Function '{}' failed: {} [{}]", name, fault, request_id);
        }

        Ok(outcome)
    }

    /// Whether a function is registered under `name`.
    pub async fn contains(&self, name: &str) -> bool {
        self.functions.read().await.contains_key(name)
    }

    /// List all registered functions with their counters, sorted by name.
    pub async fn list(&self) -> Vec<FunctionStats> {
        let functions = self.functions.read().await;
        let mut stats: Vec<FunctionStats> = functions
            .iter()
            .map(|(name, entry)| FunctionStats {
                name: name.clone(),
                invocations: entry.invocations.load(Ordering::Relaxed),
                faults: entry.faults.load(Ordering::Relaxed),
            })
            .collect();
        stats.sort_by(|a, b| a.name.cmp(&b.name));
        stats
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
