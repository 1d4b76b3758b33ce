use super::{CustomMetadata, DataType, RuleArg, ValidationRules};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Metadata describing one attribute of an entity.
///
/// This is what the host framework's introspection hands over for each
/// field. It is built once per generation and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDescriptor {
    /// The declared type
    #[serde(rename = "type")]
    pub ty: DataType,

    /// `Some(false)` forbids null. Unset behaves as nullable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_null: Option<bool>,

    /// `Some(Value::Null)` is an explicit null default; `None` means the
    /// attribute has no default at all.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<Value>,

    /// Enumeration members declared directly on the attribute. When
    /// non-empty these win over the members of an `ENUM` type.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,

    /// Validation rules, keyed by rule name
    #[serde(default, skip_serializing_if = "ValidationRules::is_empty")]
    pub validate: ValidationRules,

    /// Schema metadata (description, examples, ...)
    #[serde(
        default,
        rename = "jsonSchema",
        skip_serializing_if = "CustomMetadata::is_empty"
    )]
    pub custom: CustomMetadata,
}

impl AttributeDescriptor {
    pub fn new(ty: impl Into<DataType>) -> Self {
        Self {
            ty: ty.into(),
            allow_null: None,
            default_value: None,
            values: vec![],
            validate: ValidationRules::default(),
            custom: CustomMetadata::default(),
        }
    }

    pub fn allow_null(mut self, allow_null: bool) -> Self {
        self.allow_null = Some(allow_null);
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn validate(mut self, rule: impl Into<String>, arg: impl Into<RuleArg>) -> Self {
        self.validate.insert(rule, arg);
        self
    }

    pub fn custom(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.custom = self.custom.with(key, value);
        self
    }

    /// Anything but an explicit `allowNull: false` is nullable.
    pub fn is_nullable(&self) -> bool {
        self.allow_null != Some(false)
    }

    pub fn has_default(&self) -> bool {
        self.default_value.is_some()
    }

    /// Mandatory attributes are listed in the entity's `required` array:
    /// those that forbid null and those that carry a default value.
    pub fn is_required(&self) -> bool {
        !self.is_nullable() || self.has_default()
    }
}

impl From<DataType> for AttributeDescriptor {
    fn from(ty: DataType) -> Self {
        Self::new(ty)
    }
}

/// Keeps `"defaultValue": null` distinct from a missing key.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
