use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use bytes::Bytes;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{collections, fmt};

/// A single DynamoDB item attribute.
///
/// `AttributeValue` is a closed tagged union: exactly one variant is populated,
/// guaranteed by the type itself. The wire format is a single-key JSON object
/// such as `{"S": "hello"}`; numbers travel as decimal text to preserve
/// arbitrary precision, and binary payloads travel as base64 text.
///
/// ```rust
/// use dynamodb_expr::value::AttributeValue;
///
/// let name = AttributeValue::string("Jane");
/// let age = AttributeValue::number(42);
/// let tags = AttributeValue::string_set(["admin", "beta"]);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AttributeValue {
    /// Binary value (base64 text on the wire).
    B(Bytes),
    /// Boolean value.
    Bool(bool),
    /// Binary set (base64 text on the wire).
    Bs(Vec<Bytes>),
    /// List of nested attribute values.
    L(Vec<AttributeValue>),
    /// Map of nested attribute values.
    M(collections::HashMap<String, AttributeValue>),
    /// Number value, stored as the literal decimal text supplied by the caller.
    N(String),
    /// Number set, each element stored as decimal text.
    Ns(Vec<String>),
    /// Null value.
    Null(bool),
    /// String value.
    S(String),
    /// String set.
    Ss(Vec<String>),
}

impl AttributeValue {
    /// Creates a binary value (`B` variant).
    pub fn binary(value: impl Into<Bytes>) -> Self {
        Self::B(value.into())
    }

    /// Creates a boolean value (`BOOL` variant).
    #[must_use]
    pub fn boolean(value: bool) -> Self {
        Self::Bool(value)
    }

    /// Creates a binary set (`BS` variant).
    pub fn binary_set<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Bytes>,
    {
        Self::Bs(values.into_iter().map(Into::into).collect())
    }

    /// Creates a list (`L` variant) of nested attribute values.
    pub fn list(values: impl IntoIterator<Item = AttributeValue>) -> Self {
        Self::L(values.into_iter().collect())
    }

    /// Creates a map (`M` variant) of nested attribute values.
    pub fn map<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, AttributeValue)>,
        K: Into<String>,
    {
        Self::M(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }

    /// Creates a number value (`N` variant).
    ///
    /// The value's `Display` output is captured verbatim as decimal text, so
    /// no precision is lost to an intermediate float conversion.
    pub fn number(value: impl fmt::Display) -> Self {
        Self::N(value.to_string())
    }

    /// Creates a number set (`NS` variant), each element as decimal text.
    pub fn number_set<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: fmt::Display,
    {
        Self::Ns(values.into_iter().map(|value| value.to_string()).collect())
    }

    /// Creates a null value (`NULL` variant).
    #[must_use]
    pub fn null() -> Self {
        Self::Null(true)
    }

    /// Creates a string value (`S` variant).
    pub fn string(value: impl Into<String>) -> Self {
        Self::S(value.into())
    }

    /// Creates a string set (`SS` variant).
    pub fn string_set<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::Ss(values.into_iter().map(Into::into).collect())
    }

    /// Returns `true` if this is a null value.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null(true))
    }

    /// Returns the string if this is an `S` variant.
    #[must_use]
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Self::S(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the decimal text if this is an `N` variant.
    #[must_use]
    pub fn as_number(&self) -> Option<&str> {
        match self {
            Self::N(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the boolean if this is a `Bool` variant.
    #[must_use]
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the nested values if this is an `L` variant.
    #[must_use]
    pub fn as_list(&self) -> Option<&[AttributeValue]> {
        match self {
            Self::L(values) => Some(values),
            _ => None,
        }
    }

    /// Returns the nested entries if this is an `M` variant.
    #[must_use]
    pub fn as_map(&self) -> Option<&collections::HashMap<String, AttributeValue>> {
        match self {
            Self::M(entries) => Some(entries),
            _ => None,
        }
    }

    /// Returns the wire type tag of the populated variant.
    ///
    /// ```rust
    /// use dynamodb_expr::value::AttributeValue;
    ///
    /// assert_eq!(AttributeValue::string("a").type_tag(), "S");
    /// assert_eq!(AttributeValue::number(1).type_tag(), "N");
    /// ```
    #[must_use]
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::B(_) => "B",
            Self::Bool(_) => "BOOL",
            Self::Bs(_) => "BS",
            Self::L(_) => "L",
            Self::M(_) => "M",
            Self::N(_) => "N",
            Self::Ns(_) => "NS",
            Self::Null(_) => "NULL",
            Self::S(_) => "S",
            Self::Ss(_) => "SS",
        }
    }
}

impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Self::B(bytes) => map.serialize_entry("B", &BASE64.encode(bytes))?,
            Self::Bool(value) => map.serialize_entry("BOOL", value)?,
            Self::Bs(values) => {
                let encoded: Vec<String> =
                    values.iter().map(|bytes| BASE64.encode(bytes)).collect();
                map.serialize_entry("BS", &encoded)?;
            }
            Self::L(values) => map.serialize_entry("L", values)?,
            Self::M(entries) => map.serialize_entry("M", entries)?,
            Self::N(value) => map.serialize_entry("N", value)?,
            Self::Ns(values) => map.serialize_entry("NS", values)?,
            Self::Null(value) => map.serialize_entry("NULL", value)?,
            Self::S(value) => map.serialize_entry("S", value)?,
            Self::Ss(values) => map.serialize_entry("SS", values)?,
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AttributeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(AttributeValueVisitor)
    }
}

const TYPE_TAGS: [&str; 10] = ["B", "BOOL", "BS", "L", "M", "N", "NS", "NULL", "S", "SS"];

struct AttributeValueVisitor;

impl<'de> Visitor<'de> for AttributeValueVisitor {
    type Value = AttributeValue;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an attribute value object with exactly one type tag")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Self::Value, M::Error> {
        let Some(tag) = map.next_key::<String>()? else {
            return Err(de::Error::custom("attribute value has no type tag"));
        };
        let value = match tag.as_str() {
            "B" => {
                let encoded: String = map.next_value()?;
                let decoded = BASE64.decode(&encoded).map_err(de::Error::custom)?;
                AttributeValue::B(Bytes::from(decoded))
            }
            "BOOL" => AttributeValue::Bool(map.next_value()?),
            "BS" => {
                let encoded: Vec<String> = map.next_value()?;
                let decoded = encoded
                    .iter()
                    .map(|element| BASE64.decode(element).map(Bytes::from))
                    .collect::<Result<_, _>>()
                    .map_err(de::Error::custom)?;
                AttributeValue::Bs(decoded)
            }
            "L" => AttributeValue::L(map.next_value()?),
            "M" => AttributeValue::M(map.next_value()?),
            "N" => AttributeValue::N(map.next_value()?),
            "NS" => AttributeValue::Ns(map.next_value()?),
            "NULL" => AttributeValue::Null(map.next_value()?),
            "S" => AttributeValue::S(map.next_value()?),
            "SS" => AttributeValue::Ss(map.next_value()?),
            other => return Err(de::Error::unknown_field(other, &TYPE_TAGS)),
        };
        // a second tag would mean more than one populated variant
        if map.next_key::<String>()?.is_some() {
            return Err(de::Error::custom(
                "attribute value has more than one type tag",
            ));
        }
        Ok(value)
    }
}
