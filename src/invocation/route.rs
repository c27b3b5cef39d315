//! Single-segment route names.

use serde_json::Value;

/// Route selected when the invocation names none.
pub const DEFAULT_ROUTE: &str = "default";

/// A flat route token such as `login` or `default`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route(String);

impl Route {
    /// Create a route from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Decode a route from the raw argument value; anything but a string is the default.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::String(name)) => Self::new(name.as_str()),
            _ => Self::default(),
        }
    }

    /// The route name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the default route.
    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_ROUTE
    }

    /// Whether `name` is a usable single path segment.
    pub fn is_single_segment(name: &str) -> bool {
        !name.is_empty() && !name.contains('/')
    }
}

impl Default for Route {
    fn default() -> Self {
        Self::new(DEFAULT_ROUTE)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Route {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
