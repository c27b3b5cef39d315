//! Entry-point trait implemented by every function.

use crate::envelope::Envelope;
use crate::error::InternalFault;
use serde_json::Value;

/// A serverless function as seen by the harness.
///
/// `invoke` is synchronous and self-contained: it reads only the argument of
/// the current call and values it builds itself, so the harness may call it
/// concurrently without coordination.
pub trait ShsfFunction: Send + Sync {
    /// Handle one invocation.
    ///
    /// Every modeled failure comes back as `Ok` with an error envelope. `Err`
    /// means an internal fault, which the harness answers with a 500-class
    /// response regardless of anything else.
    fn invoke(&self, arg: &Value) -> Result<Envelope, InternalFault>;

    /// Get the function name.
    fn name(&self) -> &str;
}
