//! Entities shared by the integration tests.
//!
//! `user` declares one attribute per supported type and validation rule
//! shape, plus every kind of relationship.

use attrschema_core::model::{
    AttributeDescriptor as Attr, DataType, GeometryKind, Model, RangeSubtype, RegexLiteral,
    RelationDescriptor, RuleArg, Through,
};
use serde_json::json;

const PHONE: &str = r"^(\([0-9]{3}\))?[0-9]{3}-[0-9]{4}$";

fn not_null(ty: impl Into<DataType>) -> Attr {
    Attr::new(ty).allow_null(false)
}

fn string() -> Attr {
    not_null(DataType::string())
}

pub fn user() -> Model {
    Model::new("user")
        .attribute("id", not_null(DataType::Integer))
        // arrays
        .attribute("ARRAY_INTEGERS", not_null(DataType::array(DataType::Integer)))
        .attribute("ARRAY_TEXTS", not_null(DataType::array(DataType::Text)))
        .attribute(
            "ARRAY_ALLOWNULL_EXPLICIT",
            Attr::new(DataType::array(DataType::Text)).allow_null(true),
        )
        .attribute("ARRAY_ALLOWNULL_IMPLICIT", DataType::array(DataType::Text))
        .attribute(
            "ARRAY_ENUM_STRINGS",
            not_null(DataType::array(DataType::enumeration(["hello", "world"]))),
        )
        // scalars
        .attribute("BIGINT", not_null(DataType::BigInt))
        .attribute("BLOB", not_null(DataType::Blob))
        .attribute("BOOLEAN", not_null(DataType::Boolean))
        .attribute("CITEXT", not_null(DataType::Citext))
        .attribute("DATE", not_null(DataType::Date))
        .attribute("DATEONLY", not_null(DataType::DateOnly))
        .attribute("DECIMAL", not_null(DataType::Decimal))
        .attribute("DOUBLE", not_null(DataType::Double))
        .attribute("ENUM", not_null(DataType::enumeration(["one", "two"])))
        .attribute(
            "ENUM_ALLOWNULL",
            Attr::new(DataType::enumeration(["one", "two"])),
        )
        .attribute("FLOAT", not_null(DataType::Float))
        .attribute("INET", not_null(DataType::Inet))
        .attribute(
            "INTEGER",
            not_null(DataType::Integer)
                .default_value(0)
                .validate("min", 0)
                .validate("max", 10),
        )
        .attribute(
            "INTEGER_ARGED",
            not_null(DataType::Integer)
                .default_value(0)
                .validate("min", json!({ "args": [0], "msg": "" }))
                .validate("max", json!({ "args": [10], "msg": "" })),
        )
        .attribute("TIME", not_null(DataType::Time))
        .attribute("UUIDV4", not_null(DataType::UuidV4))
        // strings
        .attribute(
            "STRING",
            string().default_value("Default value for STRING"),
        )
        .attribute("STRING_EMAIL", string().validate("isEmail", true))
        .attribute(
            "STRING_EMAIL_ARGED",
            string().validate("isEmail", json!({ "msg": "must be email" })),
        )
        .attribute("STRING_LENGTH_RANGE", string().validate("len", json!([2, 10])))
        .attribute(
            "STRING_LENGTH_RANGE_ARGED",
            string().validate("len", json!({ "args": [2, 10], "msg": "" })),
        )
        .attribute("STRING_NOT_EMPTY", string().validate("notEmpty", true))
        .attribute("STRING_IS_URL", string().validate("isUrl", true))
        .attribute("STRING_IS_ALPHA", string().validate("isAlpha", true))
        .attribute("STRING_IS_NUMERIC", string().validate("isNumeric", true))
        .attribute("STRING_IS_LOWERCASE", string().validate("isLowercase", true))
        .attribute("STRING_IS_UPPERCASE", string().validate("isUppercase", true))
        .attribute(
            "STRING_IS_ALPHANUMERIC",
            string().validate("isAlphanumeric", true),
        )
        .attribute("STRING_HAS_SUBSTRING", string().validate("contains", "foo"))
        .attribute("STRING_HAS_NO_SUBSTRING", string().validate("notContains", "bar"))
        .attribute(
            "STRING_HAS_NO_SUBSTRING_ARGED_ARRAY",
            string().validate("notContains", json!({ "args": ["foo", "bar"], "msg": "" })),
        )
        .attribute(
            "STRING_HAS_NO_SUBSTRING_ARGED_NON_ARRAY",
            string().validate("notContains", json!({ "args": "bar", "msg": "" })),
        )
        .attribute("STRING_NOT_IN", string().validate("notIn", json!([["mongoose"]])))
        .attribute(
            "STRING_NOT_IN_ARGED",
            string().validate(
                "notIn",
                json!({ "args": [["mongoose"], ["lion"]], "msg": "" }),
            ),
        )
        .attribute("STRING_IS", string().validate("is", RegexLiteral::new(PHONE, "")))
        .attribute("STRING_IS_STRING", string().validate("is", PHONE))
        .attribute(
            "STRING_IS_ARGED_STRING",
            string().validate("is", json!({ "args": PHONE, "msg": "should match" })),
        )
        .attribute(
            "STRING_IS_ARGED_REGEXP",
            string().validate(
                "is",
                RuleArg::with_message(RegexLiteral::new(PHONE, ""), "should match"),
            ),
        )
        .attribute("STRING_IS_ARRAY", string().validate("is", json!([PHONE, "i"])))
        .attribute(
            "STRING_NOT",
            string().validate("not", RegexLiteral::new("^[a-z]+$", "i")),
        )
        .attribute("STRING_NOT_STRING", string().validate("not", "^[a-z]+$"))
        .attribute(
            "STRING_NOT_ARGED_REGEXP",
            string().validate(
                "not",
                RuleArg::with_message(RegexLiteral::new("^[a-z]+$", "i"), "should not match"),
            ),
        )
        .attribute(
            "STRING_NOT_ARRAY",
            string().validate("not", json!(["^[a-z]+$", "i"])),
        )
        .attribute(
            "STRING_ALLOWNULL_EXPLICIT",
            Attr::new(DataType::string()).allow_null(true),
        )
        .attribute("STRING_ALLOWNULL_IMPLICIT", DataType::string())
        .attribute("STRING_1234", not_null(DataType::string_with_length(1234)))
        .attribute("TEXT", not_null(DataType::Text))
        // documents
        .attribute("JSON", not_null(DataType::Json))
        .attribute(
            "JSON_OBJECT",
            not_null(DataType::Json).custom("schema", json!({ "type": "object" })),
        )
        .attribute("JSONB_ALLOWNULL", Attr::new(DataType::Jsonb).allow_null(true))
        .attribute(
            "VIRTUAL",
            not_null(DataType::virtual_returning(DataType::Boolean)),
        )
        .attribute(
            "VIRTUAL_DEPENDENCY",
            not_null(DataType::virtual_returning(DataType::Integer)),
        )
        // custom metadata
        .attribute(
            "CUSTOM_DESCRIPTION",
            string().custom("description", "Custom attribute description"),
        )
        .attribute(
            "CUSTOM_EXAMPLES",
            string().custom("examples", json!(["Custom example 1", "Custom example 2"])),
        )
        .attribute("CUSTOM_READONLY", string().custom("readOnly", true))
        .attribute("CUSTOM_WRITEONLY", string().custom("writeOnly", true))
        // postgres
        .attribute("RANGE_INTEGER", DataType::Range(RangeSubtype::Integer))
        .attribute("RANGE_DECIMAL", DataType::Range(RangeSubtype::Decimal))
        .attribute("RANGE_BIGINT", DataType::Range(RangeSubtype::BigInt))
        .attribute("RANGE_DATE", DataType::Range(RangeSubtype::DateTime))
        .attribute("RANGE_DATEONLY", DataType::Range(RangeSubtype::DateOnly))
        .attribute("HSTORE", DataType::HStore)
        .attribute("GEOMETRY", not_null(DataType::Geometry(None)))
        .attribute(
            "GEOMETRY_POINT",
            not_null(DataType::Geometry(Some(GeometryKind::Point))),
        )
        .attribute(
            "GEOMETRY_LINESTRING",
            not_null(DataType::Geometry(Some(GeometryKind::LineString))),
        )
        .attribute(
            "GEOMETRY_POLYGON",
            not_null(DataType::Geometry(Some(GeometryKind::Polygon))),
        )
        .attribute(
            "GEOGRAPHY_POINT",
            not_null(DataType::Geography(Some(GeometryKind::Point))),
        )
        // timestamps and foreign keys
        .attribute("createdAt", not_null(DataType::Date))
        .attribute("updatedAt", not_null(DataType::Date))
        .attribute("companyId", not_null(DataType::Integer))
        .attribute("bossId", not_null(DataType::Integer))
        .relation("profile", RelationDescriptor::has_one("profile"))
        .relation("company", RelationDescriptor::belongs_to("company"))
        .relation("documents", RelationDescriptor::has_many("document"))
        .relation("boss", RelationDescriptor::has_one("user"))
        .relation(
            "friends",
            RelationDescriptor::belongs_to_many("user", Through::new("friendship")),
        )
        .relation(
            "groups",
            RelationDescriptor::belongs_to_many("group", Through::new("usergroup")),
        )
}

pub fn profile() -> Model {
    Model::new("profile")
        .attribute("name", DataType::string())
        .attribute("userId", not_null(DataType::Integer))
}

pub fn company() -> Model {
    Model::new("company").attribute("name", DataType::string())
}

pub fn document() -> Model {
    Model::new("document")
        .attribute("name", DataType::string())
        .attribute("userId", not_null(DataType::Integer))
}

pub fn group() -> Model {
    Model::new("group").attribute("name", string())
}

pub fn usergroup() -> Model {
    Model::new("usergroup")
        .attribute("userId", not_null(DataType::Integer))
        .attribute("groupId", not_null(DataType::Integer))
}

pub fn friendship() -> Model {
    Model::new("friendship")
        .attribute(
            "isBestFriend",
            Attr::new(DataType::Boolean).default_value(false),
        )
        .attribute("userId", not_null(DataType::Integer))
        .attribute("friendId", not_null(DataType::Integer))
}

/// Every entity referenced by `user`, `user` first.
pub fn models() -> Vec<Model> {
    vec![
        user(),
        profile(),
        company(),
        document(),
        friendship(),
        group(),
        usergroup(),
    ]
}
