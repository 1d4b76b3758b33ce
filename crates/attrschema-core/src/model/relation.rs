use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A named relationship from one entity to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationDescriptor {
    /// Cardinality of the relationship
    #[serde(flatten)]
    pub kind: RelationKind,

    /// Name of the associated entity
    pub target: String,
}

/// Relationship cardinality. The kind alone decides the shape of the emitted
/// fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RelationKind {
    /// Single, owned by this entity (the foreign key lives on the target).
    HasOne,

    /// Single, owning (the foreign key lives on this entity).
    BelongsTo,

    /// Collection of owned entities.
    HasMany,

    /// Many-to-many through a junction entity.
    BelongsToMany(Through),
}

/// The junction entity of a many-to-many relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Through {
    /// Name of the junction entity
    #[serde(rename = "through")]
    pub entity: String,

    /// Plural name of the junction entity. This is the property key the
    /// junction object is nested under.
    #[serde(
        default,
        rename = "throughPlural",
        skip_serializing_if = "Option::is_none"
    )]
    pub plural: Option<String>,
}

impl RelationDescriptor {
    pub fn has_one(target: impl Into<String>) -> Self {
        Self::new(RelationKind::HasOne, target)
    }

    pub fn belongs_to(target: impl Into<String>) -> Self {
        Self::new(RelationKind::BelongsTo, target)
    }

    pub fn has_many(target: impl Into<String>) -> Self {
        Self::new(RelationKind::HasMany, target)
    }

    pub fn belongs_to_many(target: impl Into<String>, through: Through) -> Self {
        Self::new(RelationKind::BelongsToMany(through), target)
    }

    pub fn new(kind: RelationKind, target: impl Into<String>) -> Self {
        Self {
            kind,
            target: target.into(),
        }
    }

    pub fn through(&self) -> Option<&Through> {
        match &self.kind {
            RelationKind::BelongsToMany(through) => Some(through),
            _ => None,
        }
    }
}

impl RelationKind {
    pub fn is_has_one(&self) -> bool {
        matches!(self, Self::HasOne)
    }

    pub fn is_belongs_to(&self) -> bool {
        matches!(self, Self::BelongsTo)
    }

    pub fn is_has_many(&self) -> bool {
        matches!(self, Self::HasMany)
    }

    pub fn is_belongs_to_many(&self) -> bool {
        matches!(self, Self::BelongsToMany(_))
    }
}

impl Through {
    /// A junction entity whose plural token is derived from its name.
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            plural: None,
        }
    }

    /// A junction entity with an explicit plural token.
    pub fn with_plural(entity: impl Into<String>, plural: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            plural: Some(plural.into()),
        }
    }

    pub fn plural(&self) -> Cow<'_, str> {
        match &self.plural {
            Some(plural) => Cow::Borrowed(plural),
            None => Cow::Owned(std_util::str::pluralize(&self.entity)),
        }
    }
}
