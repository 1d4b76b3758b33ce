use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The declared type of an attribute.
///
/// One variant per type kind understood by the mapping engine. Kinds the
/// engine does not know are kept as [`DataType::Other`] and translate to the
/// most permissive schema rather than failing.
///
/// `DataType` round-trips through the host framework's textual notation:
///
/// ```
/// # use attrschema_core::model::{DataType, GeometryKind};
/// let ty: DataType = "GEOMETRY(POINT)".parse().unwrap();
/// assert_eq!(ty, DataType::Geometry(Some(GeometryKind::Point)));
/// assert_eq!(ty.to_string(), "GEOMETRY(POINT)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DataType {
    /// Array of the element type
    Array(Box<DataType>),
    /// Signed 64-bit integer
    BigInt,
    /// Binary payload
    Blob,
    Boolean,
    Char,
    Cidr,
    /// Case-insensitive text
    Citext,
    /// Date and time
    Date,
    /// Date without a time component
    DateOnly,
    Decimal,
    /// Double precision floating point
    Double,
    /// Enumeration of string members
    Enum(Vec<String>),
    Float,
    /// Geographic shape, optionally restricted to one kind
    Geography(Option<GeometryKind>),
    /// Geometric shape, optionally restricted to one kind
    Geometry(Option<GeometryKind>),
    /// String-to-string key/value store
    HStore,
    /// IPv4 or IPv6 address
    Inet,
    Integer,
    Json,
    Jsonb,
    MacAddr,
    MediumInt,
    Number,
    /// Interval over the subtype
    Range(RangeSubtype),
    Real,
    SmallInt,
    /// Variable length string, optionally bounded
    String { length: Option<u64> },
    Text,
    Time,
    TinyInt,
    Uuid,
    UuidV1,
    UuidV4,
    /// Computed attribute; translated as its return type when one is declared
    Virtual(Option<Box<DataType>>),
    /// A type key this crate does not recognize
    Other(String),
}

/// The shape of a geometry or geography.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
}

/// The element type of a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeSubtype {
    Integer,
    Decimal,
    BigInt,
    DateTime,
    DateOnly,
}

impl DataType {
    pub fn array(element: impl Into<DataType>) -> Self {
        Self::Array(Box::new(element.into()))
    }

    pub fn string() -> Self {
        Self::String { length: None }
    }

    pub fn string_with_length(length: u64) -> Self {
        Self::String {
            length: Some(length),
        }
    }

    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Enum(values.into_iter().map(Into::into).collect())
    }

    pub fn virtual_returning(return_type: impl Into<DataType>) -> Self {
        Self::Virtual(Some(Box::new(return_type.into())))
    }

    /// The bare type key, without parameters.
    pub fn key(&self) -> &str {
        match self {
            Self::Array(_) => "ARRAY",
            Self::BigInt => "BIGINT",
            Self::Blob => "BLOB",
            Self::Boolean => "BOOLEAN",
            Self::Char => "CHAR",
            Self::Cidr => "CIDR",
            Self::Citext => "CITEXT",
            Self::Date => "DATE",
            Self::DateOnly => "DATEONLY",
            Self::Decimal => "DECIMAL",
            Self::Double => "DOUBLE PRECISION",
            Self::Enum(_) => "ENUM",
            Self::Float => "FLOAT",
            Self::Geography(_) => "GEOGRAPHY",
            Self::Geometry(_) => "GEOMETRY",
            Self::HStore => "HSTORE",
            Self::Inet => "INET",
            Self::Integer => "INTEGER",
            Self::Json => "JSON",
            Self::Jsonb => "JSONB",
            Self::MacAddr => "MACADDR",
            Self::MediumInt => "MEDIUMINT",
            Self::Number => "NUMBER",
            Self::Range(_) => "RANGE",
            Self::Real => "REAL",
            Self::SmallInt => "SMALLINT",
            Self::String { .. } => "STRING",
            Self::Text => "TEXT",
            Self::Time => "TIME",
            Self::TinyInt => "TINYINT",
            Self::Uuid => "UUID",
            Self::UuidV1 => "UUIDV1",
            Self::UuidV4 => "UUIDV4",
            Self::Virtual(_) => "VIRTUAL",
            Self::Other(key) => key,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::Integer | Self::BigInt | Self::MediumInt | Self::SmallInt | Self::TinyInt
        )
    }

    pub fn is_number(&self) -> bool {
        matches!(
            self,
            Self::Decimal | Self::Double | Self::Float | Self::Real | Self::Number
        )
    }

    /// True for the free-text string kinds (not formatted strings like UUID).
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            Self::String { .. } | Self::Text | Self::Char | Self::Citext
        )
    }

    pub fn is_virtual(&self) -> bool {
        matches!(self, Self::Virtual(_))
    }

    /// Resolves a `VIRTUAL` to its declared return type. Other types resolve
    /// to themselves; a `VIRTUAL` without a return type stays as is.
    pub fn resolve(&self) -> &DataType {
        match self {
            Self::Virtual(Some(return_type)) => return_type.resolve(),
            ty => ty,
        }
    }
}

impl GeometryKind {
    pub const ALL: [GeometryKind; 3] = [Self::Point, Self::LineString, Self::Polygon];

    /// The upper-case name used both in the type notation and as the
    /// geometry object's `type` value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Point => "POINT",
            Self::LineString => "LINESTRING",
            Self::Polygon => "POLYGON",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "POINT" => Some(Self::Point),
            "LINESTRING" => Some(Self::LineString),
            "POLYGON" => Some(Self::Polygon),
            _ => None,
        }
    }
}

impl RangeSubtype {
    pub fn is_temporal(self) -> bool {
        matches!(self, Self::DateTime | Self::DateOnly)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::Decimal => "DECIMAL",
            Self::BigInt => "BIGINT",
            Self::DateTime => "DATE",
            Self::DateOnly => "DATEONLY",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "INTEGER" => Some(Self::Integer),
            "DECIMAL" => Some(Self::Decimal),
            "BIGINT" => Some(Self::BigInt),
            "DATE" | "DATETIME" => Some(Self::DateTime),
            "DATEONLY" => Some(Self::DateOnly),
            _ => None,
        }
    }
}

impl FromStr for DataType {
    type Err = Error;

    fn from_str(src: &str) -> Result<Self> {
        let src = src.trim();
        let (head, args) = split_args(src)?;
        let key = head.to_ascii_uppercase();

        // Parameterless kinds reject an argument list; parameterized kinds
        // accept one (some of them require it).
        let ty = match (key.as_str(), args) {
            ("ARRAY", Some(inner)) => Self::array(inner.parse::<DataType>()?),
            ("ENUM", Some(list)) => Self::Enum(parse_enum_values(src, list)?),
            // Members declared on the attribute instead
            ("ENUM", None) => Self::Enum(vec![]),
            ("GEOMETRY", kind) | ("GEOGRAPHY", kind) => {
                let kind = match kind {
                    None => None,
                    Some(kind) => match GeometryKind::from_key(&kind.trim().to_ascii_uppercase()) {
                        Some(kind) => Some(kind),
                        None => return Ok(Self::Other(src.to_string())),
                    },
                };

                if key == "GEOMETRY" {
                    Self::Geometry(kind)
                } else {
                    Self::Geography(kind)
                }
            }
            ("RANGE", Some(subtype)) => {
                match RangeSubtype::from_key(&subtype.trim().to_ascii_uppercase()) {
                    Some(subtype) => Self::Range(subtype),
                    None => Self::Other(src.to_string()),
                }
            }
            ("STRING" | "VARCHAR", length) => Self::String {
                length: length.map(|len| parse_length(src, len)).transpose()?,
            },
            ("VIRTUAL", None) => Self::Virtual(None),
            ("VIRTUAL", Some(inner)) => Self::virtual_returning(inner.parse::<DataType>()?),
            (_, Some(_)) => Self::Other(src.to_string()),
            ("BIGINT", None) => Self::BigInt,
            ("BLOB", None) => Self::Blob,
            ("BOOLEAN", None) => Self::Boolean,
            ("CHAR", None) => Self::Char,
            ("CIDR", None) => Self::Cidr,
            ("CITEXT", None) => Self::Citext,
            ("DATE", None) => Self::Date,
            ("DATEONLY", None) => Self::DateOnly,
            ("DECIMAL", None) => Self::Decimal,
            ("DOUBLE" | "DOUBLE PRECISION", None) => Self::Double,
            ("FLOAT", None) => Self::Float,
            ("HSTORE", None) => Self::HStore,
            ("INET", None) => Self::Inet,
            ("INTEGER", None) => Self::Integer,
            ("JSON", None) => Self::Json,
            ("JSONB", None) => Self::Jsonb,
            ("MACADDR", None) => Self::MacAddr,
            ("MEDIUMINT", None) => Self::MediumInt,
            ("NUMBER", None) => Self::Number,
            ("REAL", None) => Self::Real,
            ("SMALLINT", None) => Self::SmallInt,
            ("TEXT", None) => Self::Text,
            ("TIME", None) => Self::Time,
            ("TINYINT", None) => Self::TinyInt,
            ("UUID", None) => Self::Uuid,
            ("UUIDV1", None) => Self::UuidV1,
            ("UUIDV4", None) => Self::UuidV4,
            (_, None) if head.is_empty() => return Err(Error::missing_argument("type")),
            (_, None) => Self::Other(head.to_string()),
        };

        Ok(ty)
    }
}

/// Splits `KEY(args)` into `("KEY", Some("args"))`. The argument list runs
/// to the last closing parenthesis so nested notations stay intact.
fn split_args(src: &str) -> Result<(&str, Option<&str>)> {
    let Some(open) = src.find('(') else {
        if src.contains(')') {
            return Err(Error::invalid_type(src, "type notation"));
        }
        return Ok((src, None));
    };

    if !src.ends_with(')') {
        return Err(Error::invalid_type(src, "type notation"));
    }

    Ok((src[..open].trim(), Some(&src[open + 1..src.len() - 1])))
}

fn parse_length(src: &str, len: &str) -> Result<u64> {
    len.trim()
        .parse()
        .map_err(|_| Error::invalid_type(src, "type notation"))
}

/// Parses `'a', 'b'` (single or double quotes, backslash escapes).
fn parse_enum_values(src: &str, list: &str) -> Result<Vec<String>> {
    let invalid = || Error::invalid_type(src, "type notation");
    let mut values = vec![];
    let mut chars = list.trim().chars().peekable();

    while let Some(quote) = chars.next() {
        if quote != '\'' && quote != '"' {
            return Err(invalid());
        }

        let mut value = String::new();
        loop {
            match chars.next().ok_or_else(invalid)? {
                '\\' => value.push(chars.next().ok_or_else(invalid)?),
                ch if ch == quote => break,
                ch => value.push(ch),
            }
        }
        values.push(value);

        while chars.next_if(|ch| ch.is_whitespace()).is_some() {}
        match chars.next() {
            None => break,
            Some(',') => while chars.next_if(|ch| ch.is_whitespace()).is_some() {},
            Some(_) => return Err(invalid()),
        }
    }

    Ok(values)
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Array(element) => write!(f, "ARRAY({element})"),
            Self::Enum(values) if values.is_empty() => f.write_str("ENUM"),
            Self::Enum(values) => {
                f.write_str("ENUM(")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))?;
                }
                f.write_str(")")
            }
            Self::Geography(Some(kind)) => write!(f, "GEOGRAPHY({})", kind.as_str()),
            Self::Geometry(Some(kind)) => write!(f, "GEOMETRY({})", kind.as_str()),
            Self::Range(subtype) => write!(f, "RANGE({})", subtype.as_str()),
            Self::String {
                length: Some(length),
            } => write!(f, "STRING({length})"),
            Self::Virtual(Some(return_type)) => write!(f, "VIRTUAL({return_type})"),
            ty => f.write_str(ty.key()),
        }
    }
}

impl TryFrom<String> for DataType {
    type Error = Error;

    fn try_from(src: String) -> Result<Self> {
        src.parse()
    }
}

impl From<DataType> for String {
    fn from(ty: DataType) -> Self {
        ty.to_string()
    }
}
