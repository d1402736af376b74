//! Field states and value coercions
//!
//! A schema-declared field is either known, legitimately absent (the service
//! said `null`), or still pending (never fetched). Pending fields are left out
//! of serialized output so that "not fetched" and "null" stay distinct.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// One schema-declared field of a record.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    /// Value returned by the service.
    Known(T),
    /// The service returned no value for the field.
    Absent,
    /// Not yet fetched from the detail endpoint.
    Pending,
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Pending
    }
}

impl<T> Field<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Field::Pending)
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Field::Known(_))
    }

    pub fn known(&self) -> Option<&T> {
        match self {
            Field::Known(value) => Some(value),
            _ => None,
        }
    }

    pub fn known_mut(&mut self) -> Option<&mut T> {
        match self {
            Field::Known(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
        match self {
            Field::Known(value) => Field::Known(f(value)),
            Field::Absent => Field::Absent,
            Field::Pending => Field::Pending,
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Field::Known(value),
            None => Field::Absent,
        }
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Known(value) => value.serialize(serializer),
            Field::Absent | Field::Pending => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<T>::deserialize(deserializer)?.into())
    }
}

/// State of a field looked up by name.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldState {
    /// Value known; `Value::Null` when the service reported no value.
    Populated(Value),
    Unhydrated,
    /// The kind does not declare this field.
    NotApplicable,
}

impl FieldState {
    pub fn is_populated(&self) -> bool {
        matches!(self, FieldState::Populated(_))
    }
}

// =============================================================================
// Timestamps
// =============================================================================

/// Publication timestamp (`source_created_at` and friends).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub NaiveDateTime);

impl Timestamp {
    const FORMAT: &'static str = "%Y-%m-%dT%H:%M:%S%.f";

    /// Parse the formats the archive has been seen to emit.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(Self(dt.naive_utc()));
        }
        for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(Self(dt));
            }
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(Self)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(&raw)
            .ok_or_else(|| de::Error::custom(format!("unrecognized timestamp '{}'", raw)))
    }
}

// =============================================================================
// Compact dates
// =============================================================================

/// A calendar date in the archive's compact `YYYYMMDD` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompactDate(pub NaiveDate);

impl CompactDate {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.len() == 8 && raw.bytes().all(|b| b.is_ascii_digit()) {
            return NaiveDate::parse_from_str(raw, "%Y%m%d").ok().map(Self);
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().map(Self)
    }
}

impl fmt::Display for CompactDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y%m%d"))
    }
}

impl From<NaiveDate> for CompactDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Serialize for CompactDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CompactDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        CompactDate::parse(&raw)
            .ok_or_else(|| de::Error::custom(format!("unrecognized date '{}'", raw)))
    }
}

// =============================================================================
// Lenient coercions
// =============================================================================

/// Scalar that the service sends as a string in one endpoint and a number or
/// boolean in another.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

/// Identifier given as a string or an integer. Missing or null becomes empty.
pub(crate) fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<Scalar>::deserialize(deserializer)?
        .map(Scalar::into_string)
        .unwrap_or_default())
}

/// Text field that may arrive as a number or boolean.
pub(crate) fn text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Field<String>, D::Error> {
    Ok(Option::<Scalar>::deserialize(deserializer)?
        .map(Scalar::into_string)
        .into())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

/// List field that some payloads flatten to a single object.
pub(crate) fn one_or_many<'de, D, T>(deserializer: D) -> Result<Field<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<OneOrMany<T>>::deserialize(deserializer)?
        .map(|value| match value {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        })
        .into())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ObjectOrList<T> {
    // Tried first: derived structs also accept sequences.
    List(Vec<Value>),
    Object(T),
}

/// Single nested resource where some endpoints send `[]` for "none".
pub(crate) fn object_or_empty<'de, D, T>(deserializer: D) -> Result<Field<Box<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<ObjectOrList<T>>::deserialize(deserializer)? {
        Some(ObjectOrList::Object(value)) => Ok(Field::Known(Box::new(value))),
        Some(ObjectOrList::List(items)) if items.is_empty() => Ok(Field::Absent),
        Some(ObjectOrList::List(_)) => {
            Err(de::Error::custom("expected an object or an empty list"))
        },
        None => Ok(Field::Absent),
    }
}
