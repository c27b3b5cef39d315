//! Function manifest for compile-time metadata.

use serde::Serialize;

/// Metadata describing a function, generated by `#[shsf_function]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FunctionManifest {
    /// Unique identifier, also the registry name.
    pub id: &'static str,
    /// Function version (e.g., "v1", "v2").
    pub version: &'static str,
    /// Optional description of the function.
    pub description: &'static str,
}

impl FunctionManifest {
    /// Create a new function manifest.
    pub const fn new(id: &'static str, version: &'static str) -> Self {
        Self {
            id,
            version,
            description: "",
        }
    }

    /// Create a manifest with description.
    pub const fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }
}

impl Default for FunctionManifest {
    fn default() -> Self {
        Self::new("", "v1")
    }
}
