use crate::{custom, relation, ty, validate, GenerationOptions, Strategy};
use attrschema_core::{
    err,
    model::{AttributeDescriptor, Entity},
    Error, Fragment, Result,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The schema of one entity: an object with one property per attribute
/// and relationship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySchema {
    #[serde(rename = "type")]
    pub ty: String,

    /// Attributes in declaration order, followed by relationships
    pub properties: IndexMap<String, Fragment>,

    /// Mandatory attributes: those that forbid null or have a default
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<bool>,
}

/// Entity schemas keyed by entity name, ready to be embedded under
/// `components.schemas` (or `$defs`) of an enclosing document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Components {
    schemas: IndexMap<String, EntitySchema>,
}

/// Generates the schema of `entity`.
///
/// Fails on the first invalid option, malformed custom metadata or broken
/// strategy contract; nothing is returned partially.
pub fn generate(
    entity: &dyn Entity,
    strategy: &dyn Strategy,
    options: &GenerationOptions,
) -> Result<EntitySchema> {
    options.verify()?;

    let name = entity.name();
    let _span = tracing::debug_span!("generate", entity = name).entered();

    let attributes = select(entity, options);
    tracing::debug!(
        attributes = attributes.len(),
        relations = entity.relations().len(),
        "generating entity schema"
    );

    let mut schema = EntitySchema::new();
    schema.additional_properties = strategy.additional_properties();

    for (attr_name, attr) in attributes {
        let fragment = attribute(attr_name, attr, strategy, options)
            .map_err(|cause| cause.context(err!("{name}.{attr_name}")))?;

        tracing::trace!(attribute = attr_name, %fragment, "mapped attribute");

        if attr.is_required() && !schema.is_required(attr_name) {
            schema.required.push(attr_name.to_string());
        }

        schema.properties.insert(attr_name.to_string(), fragment);
    }

    if options.associations {
        for (relation_name, relation) in entity.relations() {
            let Some(fragment) = relation::map(relation_name, relation, strategy, options) else {
                continue;
            };

            for (key, value) in fragment {
                let property = Fragment::try_from(value).map_err(|value| {
                    Error::strategy_contract(
                        "relationship",
                        format!("property `{key}` is not an object: {value}"),
                    )
                    .context(err!("{name}.{relation_name}"))
                })?;

                schema.properties.insert(key, property);
            }
        }
    }

    tracing::debug!(
        properties = schema.properties.len(),
        required = schema.required.len(),
        "generated entity schema"
    );

    Ok(schema)
}

/// The attributes to render. An `include` list also decides the order.
fn select<'a>(
    entity: &'a dyn Entity,
    options: &GenerationOptions,
) -> Vec<(&'a str, &'a AttributeDescriptor)> {
    let attributes = entity.attributes();

    if !options.include.is_empty() {
        return options
            .include
            .iter()
            .filter_map(|name| attributes.get_key_value(name))
            .map(|(name, attr)| (name.as_str(), attr))
            .collect();
    }

    attributes
        .iter()
        .filter(|(name, _)| !options.exclude.contains(name))
        .map(|(name, attr)| (name.as_str(), attr))
        .collect()
}

/// One attribute's schema. Later fragments overwrite keys of earlier ones.
fn attribute(
    name: &str,
    attr: &AttributeDescriptor,
    strategy: &dyn Strategy,
    options: &GenerationOptions,
) -> Result<Fragment> {
    let mut fragment = ty::map(name, attr, strategy)?;
    fragment.extend(validate::map(name, attr, strategy, options.unknown_rules)?);

    let custom = &attr.custom;
    for handler in [
        custom::schema_override(custom)?,
        custom::description(custom)?,
        custom::read_write_only(custom)?,
        custom::examples(custom, strategy)?,
    ]
    .into_iter()
    .flatten()
    {
        fragment.extend(handler);
    }

    Ok(fragment)
}

impl EntitySchema {
    pub fn new() -> EntitySchema {
        EntitySchema {
            ty: "object".to_string(),
            properties: IndexMap::new(),
            required: vec![],
            additional_properties: None,
        }
    }

    pub fn property(&self, name: &str) -> Option<&Fragment> {
        self.properties.get(name)
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|required| required == name)
    }

    pub fn to_value(&self) -> Value {
        // Serializing a map of JSON objects cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl Default for EntitySchema {
    fn default() -> Self {
        EntitySchema::new()
    }
}

impl Components {
    pub fn new() -> Components {
        Components::default()
    }

    /// Generates `entity` and stores it under its name, replacing any
    /// schema already stored under that name.
    pub fn add(
        &mut self,
        entity: &dyn Entity,
        strategy: &dyn Strategy,
        options: &GenerationOptions,
    ) -> Result<&EntitySchema> {
        let schema = generate(entity, strategy, options)?;
        let name = entity.name().to_string();
        self.schemas.insert(name.clone(), schema);
        Ok(&self.schemas[&name])
    }

    pub fn insert(&mut self, name: impl Into<String>, schema: EntitySchema) {
        self.schemas.insert(name.into(), schema);
    }

    pub fn get(&self, name: &str) -> Option<&EntitySchema> {
        self.schemas.get(name)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EntitySchema)> {
        self.schemas
            .iter()
            .map(|(name, schema)| (name.as_str(), schema))
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
