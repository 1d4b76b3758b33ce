use attrschema_core::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Options controlling which parts of an entity end up in its schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationOptions {
    /// Only these attributes, in this order. Exclusive with `exclude`.
    pub include: Vec<String>,

    /// All attributes but these. Exclusive with `include`.
    pub exclude: Vec<String>,

    /// Whether relationships are rendered at all.
    pub associations: bool,

    /// Only these relationships. Exclusive with `exclude_associations`.
    pub include_associations: Vec<String>,

    /// All relationships but these. Exclusive with `include_associations`.
    pub exclude_associations: Vec<String>,

    /// What to do with validation rules the mapper does not know.
    pub unknown_rules: UnknownRulePolicy,
}

/// Handling of unrecognized validation-rule names. They never fail
/// generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnknownRulePolicy {
    /// Skip silently.
    #[default]
    Ignore,

    /// Skip and emit a `tracing` warning.
    Warn,
}

impl GenerationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = attributes.into_iter().map(Into::into).collect();
        self
    }

    pub fn exclude<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = attributes.into_iter().map(Into::into).collect();
        self
    }

    pub fn associations(mut self, associations: bool) -> Self {
        self.associations = associations;
        self
    }

    pub fn include_associations<I, S>(mut self, relations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_associations = relations.into_iter().map(Into::into).collect();
        self
    }

    pub fn exclude_associations<I, S>(mut self, relations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_associations = relations.into_iter().map(Into::into).collect();
        self
    }

    pub fn unknown_rules(mut self, policy: UnknownRulePolicy) -> Self {
        self.unknown_rules = policy;
        self
    }

    /// Rejects allow and deny lists given together.
    pub fn verify(&self) -> Result<()> {
        if !self.include.is_empty() && !self.exclude.is_empty() {
            return Err(Error::mutually_exclusive("include", "exclude"));
        }

        if !self.include_associations.is_empty() && !self.exclude_associations.is_empty() {
            return Err(Error::mutually_exclusive(
                "includeAssociations",
                "excludeAssociations",
            ));
        }

        Ok(())
    }

    /// Whether the relationship `name` passes the allow/deny lists.
    pub fn includes_relation(&self, name: &str) -> bool {
        if self.exclude_associations.iter().any(|excluded| excluded == name) {
            return false;
        }

        self.include_associations.is_empty()
            || self.include_associations.iter().any(|included| included == name)
    }
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            include: vec![],
            exclude: vec![],
            associations: true,
            include_associations: vec![],
            exclude_associations: vec![],
            unknown_rules: UnknownRulePolicy::Ignore,
        }
    }
}

impl UnknownRulePolicy {
    pub fn is_warn(self) -> bool {
        matches!(self, Self::Warn)
    }
}

/// Reads options from loosely typed input, such as a configuration file.
///
/// Absent keys take their defaults. `include` and `exclude` may be `null`;
/// the other settings are required to be non-null when present.
impl TryFrom<&Value> for GenerationOptions {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        let object = match value {
            Value::Null => return Ok(Self::default()),
            Value::Object(object) => object,
            _ => return Err(Error::invalid_type("options", "object")),
        };

        let mut options = Self::default();

        for (key, value) in object {
            match key.as_str() {
                "include" => options.include = optional_list(key, value)?,
                "exclude" => options.exclude = optional_list(key, value)?,
                "associations" => match value {
                    Value::Bool(associations) => options.associations = *associations,
                    Value::Null => return Err(Error::missing_argument(key)),
                    _ => return Err(Error::invalid_type(key, "boolean")),
                },
                "includeAssociations" => options.include_associations = required_list(key, value)?,
                "excludeAssociations" => options.exclude_associations = required_list(key, value)?,
                "unknownRules" => {
                    options.unknown_rules = serde_json::from_value(value.clone())
                        .map_err(|_| Error::invalid_type(key, "\"ignore\" or \"warn\""))?
                }
                _ => {}
            }
        }

        Ok(options)
    }
}

fn optional_list(name: &str, value: &Value) -> Result<Vec<String>> {
    match value {
        Value::Null => Ok(vec![]),
        value => required_list(name, value),
    }
}

fn required_list(name: &str, value: &Value) -> Result<Vec<String>> {
    let Value::Array(items) = value else {
        return Err(match value {
            Value::Null => Error::missing_argument(name),
            _ => Error::invalid_type(name, "array"),
        });
    };

    items
        .iter()
        .map(|item| match item {
            Value::String(item) => Ok(item.clone()),
            _ => Err(Error::invalid_type(name, "array of strings")),
        })
        .collect()
}
