use super::{NullableInput, Strategy};
use attrschema_core::Fragment;
use serde_json::Value;

/// OpenAPI 3.0 schema objects.
///
/// Nullability is the `nullable: true` keyword. References point into
/// `#/components/schemas`.
#[derive(Debug, Clone, Default)]
pub struct OpenApi {
    additional_properties: Option<bool>,
}

impl OpenApi {
    pub fn new() -> OpenApi {
        OpenApi::default()
    }

    /// Emits `additionalProperties` with the given value on every entity
    /// schema.
    pub fn additional_properties(mut self, allowed: bool) -> OpenApi {
        self.additional_properties = Some(allowed);
        self
    }
}

impl Strategy for OpenApi {
    fn nullable(&self, input: NullableInput) -> Fragment {
        let fragment = match input {
            NullableInput::Type(ty) => Fragment::new().with("type", ty),
            NullableInput::Union(members) => Fragment::new().with("anyOf", members),
        };

        fragment.with("nullable", true)
    }

    fn binary_encoding(&self) -> Fragment {
        Fragment::new().with("format", "byte")
    }

    fn examples(&self, examples: &[Value]) -> Fragment {
        Fragment::new().with("example", examples.to_vec())
    }

    fn reference(&self, entity: &str) -> String {
        format!("#/components/schemas/{entity}")
    }

    fn additional_properties(&self) -> Option<bool> {
        self.additional_properties
    }
}
