//! Read-only view over the request body with defaulted accessors.

use serde_json::{Map, Value};

/// Body fields of one invocation.
///
/// Keys are not guaranteed present and values are not guaranteed to have the
/// expected type; accessors fall back to defaults instead of failing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestBody {
    fields: Map<String, Value>,
}

impl RequestBody {
    /// Wrap a decoded mapping.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Interpret any value as a body: mappings are kept, everything else is empty.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Object(fields)) => Self::new(fields.clone()),
            _ => Self::default(),
        }
    }

    /// The value of `field`, treating an explicit null as absent.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field).filter(|v| !v.is_null())
    }

    /// The string value of `field`, if it is a string.
    pub fn string(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// The string value of `field`, or `default` when absent or not a string.
    pub fn str_or<'a>(&'a self, field: &str, default: &'a str) -> &'a str {
        self.string(field).unwrap_or(default)
    }

    /// The nested mapping under `field`; empty when absent or not a mapping.
    pub fn object(&self, field: &str) -> RequestBody {
        Self::from_value(self.fields.get(field))
    }

    /// Follow `path` through nested mappings to a string, e.g. `["user", "name"]`.
    pub fn path_str_or<'a>(&'a self, path: &[&str], default: &'a str) -> &'a str {
        let Some((last, parents)) = path.split_last() else {
            return default;
        };
        let mut current = &self.fields;
        for key in parents {
            match current.get(*key) {
                Some(Value::Object(inner)) => current = inner,
                _ => return default,
            }
        }
        current.get(*last).and_then(Value::as_str).unwrap_or(default)
    }

    /// Whether `field` is present, null included.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Whether the body has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// The underlying mapping.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// A copy of the body as a JSON value, for echoing back to the caller.
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}
