//! Function entry points and the host-side function registry.

pub mod handler;
pub mod manifest;
pub mod registry;

pub use handler::ShsfFunction;
pub use manifest::FunctionManifest;
pub use registry::{FunctionRegistry, FunctionStats};
