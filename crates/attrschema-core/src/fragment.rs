use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A partial schema object produced by one mapper.
///
/// Fragments are plain JSON objects whose keys keep insertion order. They
/// are combined with [`Fragment::merge`], a shallow key union where the
/// right-hand side wins on collision. A fragment is never mutated after a
/// mapper returns it; merging consumes both sides and yields a new value.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fragment {
    map: Map<String, Value>,
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    /// `{ "type": ty }`
    pub fn ty(ty: &str) -> Self {
        Self::new().with("type", ty)
    }

    /// `{ "type": ty, "format": format }`
    pub fn ty_format(ty: &str, format: &str) -> Self {
        Self::ty(ty).with("format", format)
    }

    /// `{ "type": "array", "items": items }`
    pub fn array(items: Fragment) -> Self {
        Self::ty("array").with("items", items)
    }

    /// `{ "anyOf": [..] }`
    pub fn any_of(variants: impl IntoIterator<Item = Fragment>) -> Self {
        let variants: Vec<Value> = variants.into_iter().map(Fragment::into_value).collect();
        Self::new().with("anyOf", variants)
    }

    /// `{ "$ref": path }`
    pub fn reference(path: impl Into<String>) -> Self {
        Self::new().with("$ref", path.into())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets `key`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.map.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.map.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.map.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.map.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Shallow key union; keys of `other` overwrite keys of `self`.
    pub fn merge(mut self, other: Fragment) -> Fragment {
        self.extend(other);
        self
    }

    /// In-place form of [`merge`](Self::merge).
    pub fn extend(&mut self, other: Fragment) {
        for (key, value) in other.map {
            self.map.insert(key, value);
        }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.map)
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.map
    }
}

impl From<Map<String, Value>> for Fragment {
    fn from(map: Map<String, Value>) -> Self {
        Self { map }
    }
}

impl From<Fragment> for Value {
    fn from(fragment: Fragment) -> Self {
        fragment.into_value()
    }
}

impl TryFrom<Value> for Fragment {
    type Error = Value;

    /// Succeeds for JSON objects; any other value is handed back.
    fn try_from(value: Value) -> Result<Self, Value> {
        match value {
            Value::Object(map) => Ok(Self { map }),
            other => Err(other),
        }
    }
}

impl FromIterator<(String, Value)> for Fragment {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Fragment {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.map.into_iter()
    }
}

impl fmt::Debug for Fragment {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.map, fmt)
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(&self.map) {
            Ok(json) => fmt.write_str(&json),
            Err(_) => Err(fmt::Error),
        }
    }
}
