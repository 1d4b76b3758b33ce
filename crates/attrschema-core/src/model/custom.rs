use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::validate::is_truthy;

/// Free-form schema metadata attached to an attribute.
///
/// Recognized keys are `description`, `examples`, `readOnly`, `writeOnly`
/// and `schema`; anything else is carried along untouched. A key set to a
/// falsy value (`null`, `false`, `0`, `""`) counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomMetadata {
    map: Map<String, Value>,
}

impl CustomMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.map.insert(key.into(), value.into());
        self
    }

    /// Returns the value of `key` unless it is missing or falsy.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.map.get(key).filter(|value| is_truthy(value))
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl From<Map<String, Value>> for CustomMetadata {
    fn from(map: Map<String, Value>) -> Self {
        Self { map }
    }
}
