use tests::*;

use attrschema::{JsonSchema, Strategy};
use pretty_assertions::assert_eq;
use serde_json::json;

const PHONE: &str = r"/^(\([0-9]{3}\))?[0-9]{3}-[0-9]{4}$/";

fn numeric_bounds(s: impl Strategy) {
    for name in ["INTEGER", "INTEGER_ARGED"] {
        let schema = property(&user(), &s, name);
        assert_eq!(schema["type"], json!("integer"), "{name}");
        assert_eq!(schema["minimum"], json!(0), "{name}");
        assert_eq!(schema["maximum"], json!(10), "{name}");
        assert_eq!(schema["default"], json!(0), "{name}");
    }
}

fn string_formats(s: impl Strategy) {
    for name in ["STRING_EMAIL", "STRING_EMAIL_ARGED"] {
        assert_eq!(property(&user(), &s, name)["format"], json!("email"), "{name}");
    }
    assert_eq!(property(&user(), &s, "STRING_IS_URL")["format"], json!("url"));
}

fn string_lengths(s: impl Strategy) {
    for name in ["STRING_LENGTH_RANGE", "STRING_LENGTH_RANGE_ARGED"] {
        let schema = property(&user(), &s, name);
        assert_eq!(schema["minLength"], json!(2), "{name}");
        assert_eq!(schema["maxLength"], json!(10), "{name}");
    }
    assert_eq!(property(&user(), &s, "STRING_NOT_EMPTY")["minLength"], json!(1));
    assert_eq!(property(&user(), &s, "STRING_1234")["maxLength"], json!(1234));
}

fn character_classes(s: impl Strategy) {
    for (name, pattern) in [
        ("STRING_IS_ALPHA", "^[a-zA-Z]+$"),
        ("STRING_IS_NUMERIC", "^[0-9]+$"),
        ("STRING_IS_ALPHANUMERIC", "^[a-zA-Z0-9]+$"),
        ("STRING_IS_LOWERCASE", "^[a-z]+$"),
        ("STRING_IS_UPPERCASE", "^[A-Z]+$"),
        ("STRING_HAS_SUBSTRING", "^.*foo.*$"),
        ("STRING_HAS_NO_SUBSTRING", "^(?!.*bar).*$"),
        ("STRING_HAS_NO_SUBSTRING_ARGED_NON_ARRAY", "^(?!.*bar).*$"),
        ("STRING_HAS_NO_SUBSTRING_ARGED_ARRAY", "^(?!.*(foo|bar)).*$"),
    ] {
        assert_eq!(property(&user(), &s, name)["pattern"], json!(pattern), "{name}");
    }
}

fn excluded_values(s: impl Strategy) {
    assert_eq!(
        property(&user(), &s, "STRING_NOT_IN")["not"],
        json!({ "enum": ["mongoose"] })
    );
    assert_eq!(
        property(&user(), &s, "STRING_NOT_IN_ARGED")["not"],
        json!({ "enum": ["mongoose", "lion"] })
    );
}

fn regular_expressions(s: impl Strategy) {
    for name in ["STRING_IS", "STRING_IS_STRING", "STRING_IS_ARGED_STRING", "STRING_IS_ARGED_REGEXP"] {
        assert_eq!(property(&user(), &s, name)["regexp"], json!(PHONE), "{name}");
    }
    assert_eq!(
        property(&user(), &s, "STRING_IS_ARRAY")["regexp"],
        json!(format!("{PHONE}i"))
    );

    for name in ["STRING_NOT", "STRING_NOT_ARGED_REGEXP", "STRING_NOT_ARRAY"] {
        assert_eq!(
            property(&user(), &s, name)["not"],
            json!({ "regexp": "/^[a-z]+$/i" }),
            "{name}"
        );
    }
    assert_eq!(
        property(&user(), &s, "STRING_NOT_STRING")["not"],
        json!({ "regexp": "/^[a-z]+$/" })
    );
}

tests!(
    numeric_bounds,
    string_formats,
    string_lengths,
    character_classes,
    excluded_values,
    regular_expressions,
);

#[test]
fn instances_are_checked() {
    let strategy = JsonSchema::new();
    let validator = |name| Validator::new(property(&user(), &strategy, name));

    let integer = validator("INTEGER");
    assert!(integer.accepts(&json!(5)));
    assert!(integer.rejects(&json!(11)));
    assert!(integer.rejects(&json!(-1)));

    let email = validator("STRING_EMAIL");
    assert!(email.accepts(&json!("john@example.com")));
    assert!(email.rejects(&json!("john")));

    let length = validator("STRING_LENGTH_RANGE");
    assert!(length.accepts(&json!("abc")));
    assert!(length.rejects(&json!("a")));
    assert!(length.rejects(&json!("abcdefghijk")));

    let alpha = validator("STRING_IS_ALPHA");
    assert!(alpha.accepts(&json!("abc")));
    assert!(alpha.rejects(&json!("abc1")));

    let contains = validator("STRING_HAS_SUBSTRING");
    assert!(contains.accepts(&json!("xfooy")));
    assert!(contains.rejects(&json!("xy")));

    let not_in = validator("STRING_NOT_IN_ARGED");
    assert!(not_in.accepts(&json!("tiger")));
    assert!(not_in.rejects(&json!("lion")));
}

#[test]
fn rules_render_only_for_constrained_kinds() {
    let schema = property(&user(), &JsonSchema::new(), "BOOLEAN");
    assert_eq!(schema, json!({ "type": "boolean" }));
}
