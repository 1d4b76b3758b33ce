//! Handlers for an attribute's custom schema metadata.
//!
//! Each handler returns `None` when its key is absent or falsy.

use crate::Strategy;
use attrschema_core::{model::CustomMetadata, Error, Fragment, Result};
use serde_json::Value;

/// An explicit schema object that replaces keys of the generated one. It
/// must declare a string `type`.
pub fn schema_override(custom: &CustomMetadata) -> Result<Option<Fragment>> {
    let Some(schema) = custom.get("schema") else {
        return Ok(None);
    };

    match schema {
        Value::Object(object) if object.get("type").is_some_and(Value::is_string) => {
            Ok(Some(Fragment::from(object.clone())))
        }
        _ => Err(Error::invalid_type("schema", "object with a string 'type'")),
    }
}

pub fn description(custom: &CustomMetadata) -> Result<Option<Fragment>> {
    match custom.get("description") {
        None => Ok(None),
        Some(Value::String(description)) => {
            Ok(Some(Fragment::new().with("description", description.as_str())))
        }
        Some(_) => Err(Error::invalid_type("description", "string")),
    }
}

/// `readOnly: true` or `writeOnly: true`, never both.
pub fn read_write_only(custom: &CustomMetadata) -> Result<Option<Fragment>> {
    let read_only = custom.get("readOnly");
    let write_only = custom.get("writeOnly");

    let (key, value) = match (read_only, write_only) {
        (None, None) => return Ok(None),
        (Some(_), Some(_)) => return Err(Error::mutually_exclusive("readOnly", "writeOnly")),
        (Some(value), None) => ("readOnly", value),
        (None, Some(value)) => ("writeOnly", value),
    };

    if !value.is_boolean() {
        return Err(Error::invalid_type(key, "boolean"));
    }

    Ok(Some(Fragment::new().with(key, true)))
}

/// Example values, rendered the strategy's way.
pub fn examples(custom: &CustomMetadata, strategy: &dyn Strategy) -> Result<Option<Fragment>> {
    match custom.get("examples") {
        None => Ok(None),
        Some(Value::Array(examples)) => Ok(Some(strategy.examples(examples))),
        Some(_) => Err(Error::invalid_type("examples", "array")),
    }
}
