mod attribute;
pub use attribute::AttributeDescriptor;

mod custom;
pub use custom::CustomMetadata;

mod data_type;
pub use data_type::{DataType, GeometryKind, RangeSubtype};

mod relation;
pub use relation::{RelationDescriptor, RelationKind, Through};

mod validate;
pub use validate::{is_truthy, RegexLiteral, RuleArg, RuleArgs, ValidationRules};

use crate::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Introspection capability of a host-framework entity.
///
/// Schema generation only ever reads through this trait, so any entity
/// representation can be plugged in by implementing it.
pub trait Entity {
    /// Name of the entity, as used in references to it.
    fn name(&self) -> &str;

    /// Attribute descriptors in declaration order.
    fn attributes(&self) -> &IndexMap<String, AttributeDescriptor>;

    /// Relationship descriptors in declaration order.
    fn relations(&self) -> &IndexMap<String, RelationDescriptor>;
}

/// An entity definition held in memory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Name of the model
    pub name: String,

    /// Attributes, keyed by attribute name
    #[serde(default)]
    pub attributes: IndexMap<String, AttributeDescriptor>,

    /// Relationships, keyed by relationship name
    #[serde(default, alias = "associations")]
    pub relations: IndexMap<String, RelationDescriptor>,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parses a model definition from its JSON form.
    pub fn from_json(src: &str) -> Result<Self> {
        Ok(serde_json::from_str(src)?)
    }

    pub fn attribute(
        mut self,
        name: impl Into<String>,
        attribute: impl Into<AttributeDescriptor>,
    ) -> Self {
        self.attributes.insert(name.into(), attribute.into());
        self
    }

    pub fn relation(mut self, name: impl Into<String>, relation: RelationDescriptor) -> Self {
        self.relations.insert(name.into(), relation);
        self
    }
}

impl Entity for Model {
    fn name(&self) -> &str {
        &self.name
    }

    fn attributes(&self) -> &IndexMap<String, AttributeDescriptor> {
        &self.attributes
    }

    fn relations(&self) -> &IndexMap<String, RelationDescriptor> {
        &self.relations
    }
}

impl<T: Entity + ?Sized> Entity for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn attributes(&self) -> &IndexMap<String, AttributeDescriptor> {
        (**self).attributes()
    }

    fn relations(&self) -> &IndexMap<String, RelationDescriptor> {
        (**self).relations()
    }
}
