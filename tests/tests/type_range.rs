use tests::*;

use attrschema::JsonSchema;
use pretty_assertions::assert_eq;
use serde_json::json;

fn range(name: &str) -> Validator {
    Validator::new(property(&user(), &JsonSchema::new(), name))
}

#[test]
fn integer_range() {
    let schema = property(&user(), &JsonSchema::new(), "RANGE_INTEGER");
    assert_eq!(schema["items"]["anyOf"][1]["type"], json!(["integer", "null"]));
    assert_eq!(schema["range"], json!(true));

    let validator = range("RANGE_INTEGER");
    assert!(validator.accepts(&json!([0, 1])));
    assert!(validator.accepts(&json!([null, 1])));
    assert!(validator.accepts(&json!(null)));
    assert!(validator.rejects(&json!([])));
    assert!(validator.rejects(&json!([1])));
    assert!(validator.rejects(&json!([1, 0])));
}

#[test]
fn inclusive_bounds() {
    let validator = range("RANGE_INTEGER");

    assert!(validator.accepts(&json!([
        { "value": 0, "inclusive": true },
        { "value": 10, "inclusive": false },
    ])));
    assert!(validator.accepts(&json!([{ "value": 0, "inclusive": true }, null])));
    assert!(validator.rejects(&json!([
        { "value": 10, "inclusive": true },
        { "value": 0, "inclusive": false },
    ])));
    assert!(validator.rejects(&json!([{ "value": 0 }, 1])));
    assert!(validator.rejects(&json!([
        { "value": 0, "inclusive": true, "open": true },
        1,
    ])));
}

#[test]
fn decimal_range() {
    let validator = range("RANGE_DECIMAL");

    assert!(validator.accepts(&json!([1, 2.3])));
    assert!(validator.accepts(&json!([1, null])));
    assert!(validator.rejects(&json!([1])));
    assert!(validator.rejects(&json!([1.1, 0])));
}

#[test]
fn bigint_range() {
    let schema = property(&user(), &JsonSchema::new(), "RANGE_BIGINT");
    assert_eq!(schema["items"]["anyOf"][1]["type"], json!(["string", "null"]));

    let validator = range("RANGE_BIGINT");
    assert!(validator.accepts(&json!(["18446744073709551616", "28446744073709551616"])));
    assert!(validator.accepts(&json!([null, "28446744073709551616"])));
    assert!(validator.accepts(&json!(["9", "10"])));
    assert!(validator.rejects(&json!(["a", "b"])));
    assert!(validator.rejects(&json!([1])));
    assert!(validator.rejects(&json!([1.1, 0])));
}

#[test]
fn date_time_range() {
    let schema = property(&user(), &JsonSchema::new(), "RANGE_DATE");
    assert_eq!(schema["items"]["anyOf"][1]["format"], json!("date-time"));
    assert_eq!(schema["daterange"], json!(true));

    let validator = range("RANGE_DATE");
    assert!(validator.accepts(&json!(["2025-05-01T00:01:00.000Z", "2026-05-01T00:00:00.000Z"])));
    assert!(validator.accepts(&json!(["2025-05-01T00:01:00.000Z", null])));
    assert!(validator.rejects(&json!(["2026-05-01T00:00:00.000Z", "2025-05-01T00:00:00.000Z"])));
}

#[test]
fn date_only_range() {
    let schema = property(&user(), &JsonSchema::new(), "RANGE_DATEONLY");
    assert_eq!(schema["items"]["anyOf"][1]["format"], json!("date"));

    let validator = range("RANGE_DATEONLY");
    assert!(validator.accepts(&json!(["2025-05-01", "2026-05-01"])));
    assert!(validator.rejects(&json!(["2026-05-01T00:00:00.000Z", "2025-05-01T00:00:00.000Z"])));
    assert!(validator.rejects(&json!(["2026-05-01", "2025-05-01"])));
}

#[test]
fn openapi_marks_bounds_nullable() {
    let schema = property(&user(), &attrschema::OpenApi::new(), "RANGE_INTEGER");

    assert_eq!(schema["type"], json!("array"));
    assert_eq!(schema["nullable"], json!(true));
    assert_eq!(
        schema["items"]["anyOf"][1],
        json!({ "type": "integer", "nullable": true })
    );
    assert_eq!(schema["minItems"], json!(2));
    assert_eq!(schema["maxItems"], json!(2));
}
