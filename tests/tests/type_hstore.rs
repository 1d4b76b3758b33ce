use tests::*;

use attrschema::{JsonSchema, OpenApi};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn hstore_values_are_nullable_strings() {
    let schema = property(&user(), &JsonSchema::new(), "HSTORE");
    assert_eq!(schema["type"], json!(["object", "null"]));

    let validator = Validator::new(schema);
    assert!(validator.accepts(&json!({ "k": "val" })));
    assert!(validator.accepts(&json!({ "k": null })));
    assert!(validator.accepts(&json!({})));
    assert!(validator.rejects(&json!({ "k": 1 })));
    assert!(validator.rejects(&json!({ "k": ["val"] })));
}

#[test]
fn openapi_hstore() {
    assert_eq!(
        property(&user(), &OpenApi::new(), "HSTORE"),
        json!({
            "type": "object",
            "nullable": true,
            "additionalProperties": { "type": "string", "nullable": true },
        })
    );
}
