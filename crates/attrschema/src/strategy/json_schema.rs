use super::{NullableInput, Strategy};
use attrschema_core::Fragment;
use serde_json::{json, Value};

/// JSON Schema 2020-12.
///
/// Nullability is a `"null"` member in the `type` array, or an extra
/// `{"type": "null"}` branch in an `anyOf`. References point into `#/$defs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchema;

impl JsonSchema {
    pub fn new() -> JsonSchema {
        JsonSchema
    }
}

impl Strategy for JsonSchema {
    fn nullable(&self, input: NullableInput) -> Fragment {
        match input {
            NullableInput::Type(Value::Array(mut types)) => {
                if !types.iter().any(|ty| ty == "null") {
                    types.push(json!("null"));
                }
                Fragment::new().with("type", types)
            }
            NullableInput::Type(ty) => Fragment::new().with("type", json!([ty, "null"])),
            NullableInput::Union(mut members) => {
                members.push(json!({ "type": "null" }));
                Fragment::new().with("anyOf", members)
            }
        }
    }

    fn binary_encoding(&self) -> Fragment {
        Fragment::new().with("contentEncoding", "base64")
    }

    fn examples(&self, examples: &[Value]) -> Fragment {
        Fragment::new().with("examples", examples.to_vec())
    }

    fn reference(&self, entity: &str) -> String {
        format!("#/$defs/{entity}")
    }
}
