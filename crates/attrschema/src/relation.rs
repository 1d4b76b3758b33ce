use crate::{GenerationOptions, Strategy};
use attrschema_core::{
    model::{RelationDescriptor, RelationKind},
    Fragment,
};

/// Renders one relationship, keyed by its name.
///
/// Returns `None` when the allow/deny lists leave the relationship out.
pub fn map(
    name: &str,
    relation: &RelationDescriptor,
    strategy: &dyn Strategy,
    options: &GenerationOptions,
) -> Option<Fragment> {
    if !options.includes_relation(name) {
        tracing::debug!(relation = name, "relationship skipped");
        return None;
    }

    let fragment = match &relation.kind {
        RelationKind::HasOne => strategy.has_one(name, relation),
        RelationKind::BelongsTo => strategy.belongs_to(name, relation),
        RelationKind::HasMany => strategy.has_many(name, relation),
        RelationKind::BelongsToMany(through) => strategy.belongs_to_many(name, relation, through),
    };

    tracing::trace!(relation = name, target = %relation.target, %fragment, "mapped relationship");
    Some(fragment)
}
