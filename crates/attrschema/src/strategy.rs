mod json_schema;
pub use json_schema::JsonSchema;

mod openapi;
pub use openapi::OpenApi;

use crate::validate::{self, Rule};
use attrschema_core::{
    model::{RelationDescriptor, Through},
    Fragment,
};
use serde_json::{json, Value};

/// Dialect-specific rendering decisions.
///
/// The mappers never spell out how a dialect expresses nullability,
/// binary encoding, examples or references. They ask the strategy. Swapping
/// the strategy retargets the whole output without touching the mappers.
///
/// Relationship methods return a fragment keyed by the relationship name,
/// ready to be merged into the entity's properties.
///
/// A strategy is immutable configuration; one instance can serve any
/// number of concurrent generations.
pub trait Strategy: Send + Sync {
    /// Converts a type (or union of schemas) into its nullable form.
    ///
    /// The result is merged over the fragment being made nullable, so it
    /// must carry a `type` or an `anyOf` key.
    fn nullable(&self, input: NullableInput) -> Fragment;

    /// Keywords marking a string as base64-encoded binary.
    fn binary_encoding(&self) -> Fragment;

    /// Keywords carrying example values.
    fn examples(&self, examples: &[Value]) -> Fragment;

    /// The `$ref` path of a named entity.
    fn reference(&self, entity: &str) -> String;

    fn has_one(&self, name: &str, relation: &RelationDescriptor) -> Fragment {
        Fragment::new().with(name, Fragment::reference(self.reference(&relation.target)))
    }

    fn belongs_to(&self, name: &str, relation: &RelationDescriptor) -> Fragment {
        Fragment::new().with(name, Fragment::reference(self.reference(&relation.target)))
    }

    fn has_many(&self, name: &str, relation: &RelationDescriptor) -> Fragment {
        let items = Fragment::reference(self.reference(&relation.target));
        Fragment::new().with(name, Fragment::array(items))
    }

    fn belongs_to_many(
        &self,
        name: &str,
        relation: &RelationDescriptor,
        through: &Through,
    ) -> Fragment {
        let junction = Fragment::ty("object").with(
            "properties",
            json!({ through.plural(): Fragment::reference(self.reference(&through.entity)) }),
        );
        let items = Fragment::new().with(
            "allOf",
            json!([Fragment::reference(self.reference(&relation.target)), junction]),
        );

        Fragment::new().with(name, Fragment::array(items))
    }

    /// Constraint keywords for an attribute's validation rules.
    ///
    /// The result only constrains; it must not contain `type`, `anyOf`,
    /// `nullable` or `default`.
    fn validation(&self, rules: &[Rule]) -> Fragment {
        validate::render(rules)
    }

    /// Value of `additionalProperties` on every generated entity schema.
    /// `None` leaves the key out.
    fn additional_properties(&self) -> Option<bool> {
        None
    }
}

/// What [`Strategy::nullable`] is asked to make nullable.
#[derive(Debug, Clone, PartialEq)]
pub enum NullableInput {
    /// The value of a fragment's `type` key.
    Type(Value),

    /// The members of a fragment's `anyOf` key.
    Union(Vec<Value>),
}

impl NullableInput {
    /// Picks the input out of a fragment. `anyOf` wins over `type`.
    pub(crate) fn of(fragment: &Fragment) -> Option<NullableInput> {
        if let Some(Value::Array(members)) = fragment.get("anyOf") {
            return Some(NullableInput::Union(members.clone()));
        }

        fragment.get("type").cloned().map(NullableInput::Type)
    }
}
