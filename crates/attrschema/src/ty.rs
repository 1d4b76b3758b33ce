use crate::strategy::{NullableInput, Strategy};
use attrschema_core::{
    model::{AttributeDescriptor, DataType, GeometryKind, RangeSubtype},
    Error, Fragment, Result,
};
use serde_json::{json, Value};

/// Primitive kinds, in the order the permissive fallback lists them.
const PRIMITIVES: [&str; 6] = ["object", "array", "boolean", "integer", "number", "string"];

/// Digits only. Used for integers of arbitrary precision, which have no
/// faithful JSON number representation.
const DIGITS: &str = "^[0-9]+$";

/// Builds an attribute's base schema: its type, then nullability, then its
/// default value.
pub fn map(name: &str, attr: &AttributeDescriptor, strategy: &dyn Strategy) -> Result<Fragment> {
    let mut fragment = base(&attr.ty, &attr.values, strategy)?;

    if attr.is_nullable() {
        fragment = nullable(fragment, strategy)?;
    }

    // An explicit `null` default is kept; only an absent default is skipped.
    if let Some(default) = &attr.default_value {
        fragment.insert("default", default.clone());
    }

    tracing::trace!(attribute = name, ty = %attr.ty, %fragment, "mapped type");
    Ok(fragment)
}

/// Makes `fragment` nullable through the strategy.
///
/// The strategy's answer is merged over the fragment. An `enum` also gains a
/// `null` member, since enumerations are checked independently of `type`.
pub fn nullable(mut fragment: Fragment, strategy: &dyn Strategy) -> Result<Fragment> {
    let Some(input) = NullableInput::of(&fragment) else {
        return Ok(fragment);
    };

    let result = strategy.nullable(input);

    if !result.contains_key("type") && !result.contains_key("anyOf") {
        return Err(Error::strategy_contract(
            "nullable",
            "result has neither `type` nor `anyOf`",
        ));
    }

    if let Some(Value::Array(members)) = fragment.get("enum") {
        if !members.contains(&Value::Null) {
            let mut members = members.clone();
            members.push(Value::Null);
            fragment.insert("enum", members);
        }
    }

    Ok(fragment.merge(result))
}

/// The schema of a type on its own, before nullability and defaults.
///
/// `values` are enumeration members declared on the attribute itself; when
/// non-empty they replace the members of an `ENUM` type.
pub fn base(ty: &DataType, values: &[String], strategy: &dyn Strategy) -> Result<Fragment> {
    use DataType::*;

    let fragment = match ty {
        // Elements are never independently nullable and never carry the
        // attribute's own enumeration list.
        Array(element) => Fragment::array(base(element, &[], strategy)?),
        BigInt => Fragment::ty_format("integer", "int64"),
        Blob => Fragment::ty("string").merge(strategy.binary_encoding()),
        Boolean => Fragment::ty("boolean"),
        Char | Cidr | Citext | MacAddr | Text => Fragment::ty("string"),
        Date => Fragment::ty_format("string", "date-time"),
        DateOnly => Fragment::ty_format("string", "date"),
        Time => Fragment::ty_format("string", "time"),
        Decimal | Real | Number => Fragment::ty("number"),
        Double => Fragment::ty_format("number", "double"),
        Float => Fragment::ty_format("number", "float"),
        Enum(members) => {
            let members: &[_] = if values.is_empty() { members } else { values };
            Fragment::ty("string").with("enum", members.to_vec())
        }
        Geography(kind) | Geometry(kind) => geometry(*kind),
        HStore => {
            let value = nullable(Fragment::ty("string"), strategy)?;
            Fragment::ty("object").with("additionalProperties", value)
        }
        Inet => Fragment::any_of([
            Fragment::ty_format("string", "ipv4"),
            Fragment::ty_format("string", "ipv6"),
        ]),
        Integer | MediumInt | SmallInt | TinyInt => Fragment::ty("integer"),
        Json | Jsonb => any(),
        Range(subtype) => range(*subtype, strategy)?,
        String { length } => {
            let fragment = Fragment::ty("string");
            match length {
                Some(length) => fragment.with("maxLength", *length),
                None => fragment,
            }
        }
        Uuid | UuidV1 | UuidV4 => Fragment::ty_format("string", "uuid"),
        Virtual(Some(return_type)) => base(return_type, values, strategy)?,
        Virtual(None) | Other(_) => any(),
    };

    Ok(fragment)
}

/// Any JSON value but `null`.
pub fn any() -> Fragment {
    Fragment::any_of(PRIMITIVES.map(Fragment::ty))
}

/// A two-element array of bounds.
///
/// Each bound is either a bare (nullable) value or a `{value, inclusive}`
/// object. The `range` / `daterange` keyword is a vendor extension telling
/// validators that support it to check that the lower bound comes first.
fn range(subtype: RangeSubtype, strategy: &dyn Strategy) -> Result<Fragment> {
    let value = match subtype {
        RangeSubtype::Integer => Fragment::ty("integer"),
        RangeSubtype::Decimal => Fragment::ty_format("number", "double"),
        RangeSubtype::BigInt => Fragment::ty("string").with("pattern", DIGITS),
        RangeSubtype::DateTime => Fragment::ty_format("string", "date-time"),
        RangeSubtype::DateOnly => Fragment::ty_format("string", "date"),
    };

    let bound = Fragment::ty("object")
        .with(
            "properties",
            json!({
                "value": value.clone(),
                "inclusive": { "type": "boolean" },
            }),
        )
        .with("required", json!(["value", "inclusive"]))
        .with("additionalProperties", false);

    let tag = if subtype.is_temporal() {
        "daterange"
    } else {
        "range"
    };

    Ok(Fragment::array(Fragment::any_of([
        bound,
        nullable(value, strategy)?,
    ]))
    .with("uniqueItems", true)
    .with("minItems", 2)
    .with("maxItems", 2)
    .with(tag, true))
}

/// A geometry object, restricted to one kind or open to all of them.
fn geometry(kind: Option<GeometryKind>) -> Fragment {
    let crs = crs();

    match kind {
        Some(kind) => geometry_kind(kind, &crs),
        None => Fragment::any_of(GeometryKind::ALL.map(|kind| geometry_kind(kind, &crs))),
    }
}

fn geometry_kind(kind: GeometryKind, crs: &Fragment) -> Fragment {
    Fragment::ty("object")
        .with(
            "properties",
            json!({
                "type": { "type": "string", "enum": [kind.as_str()] },
                "coordinates": coordinates(kind),
                "crs": crs,
            }),
        )
        .with("required", json!(["type", "coordinates"]))
}

fn coordinates(kind: GeometryKind) -> Fragment {
    // 2D, or 3D with elevation
    let point = Fragment::array(Fragment::ty("number"))
        .with("minItems", 2)
        .with("maxItems", 3);

    match kind {
        GeometryKind::Point => point,
        GeometryKind::LineString => Fragment::array(point).with("minItems", 2),
        GeometryKind::Polygon => {
            let ring = Fragment::array(point).with("minItems", 4);
            Fragment::array(ring)
        }
    }
}

/// Coordinate reference system, e.g. `{"type": "name", "properties":
/// {"name": "EPSG:4326"}}`.
fn crs() -> Fragment {
    let non_empty = json!({ "type": "string", "minLength": 1 });

    Fragment::ty("object")
        .with(
            "properties",
            json!({
                "type": non_empty,
                "properties": {
                    "type": "object",
                    "properties": { "name": non_empty },
                    "required": ["name"],
                },
            }),
        )
        .with("required", json!(["type", "properties"]))
}
