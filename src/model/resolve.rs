//! Field Resolver
//!
//! Turns one raw JSON object into a typed record. The same code path accepts
//! search hits (summary payloads) and detail lookups; the only difference is
//! how a missing schema-nullable field is read.

use super::{
    Classification, Collection, Contributor, Coverage, Document, Donor, Kind, Language, MediaFile,
    Publisher, Record, Repository, Resource, Right, Subject, Theme, Transcript, Translation, Type,
};
use crate::error::{ArchiveError, Result};
use serde_json::{Map, Value};

/// Which endpoint produced a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    /// A hit inside a search result page.
    Summary,
    /// A full record from the detail endpoint.
    Detail,
}

/// Resolve a raw payload into a typed record.
///
/// Declared fields missing from the payload come back pending. In a detail
/// payload, a missing field the kind declares nullable is read as null.
/// Collection declares nothing nullable: its search and detail endpoints
/// disagree on which fields they return, so absence there never means null.
pub fn resolve<R: Resource>(raw: &Value, shape: PayloadShape) -> Result<R> {
    let Value::Object(map) = raw else {
        return Err(ArchiveError::schema(
            R::KIND,
            format!("expected a JSON object, found {}", json_type(raw)),
        ));
    };

    let mut map = map.clone();
    if shape == PayloadShape::Detail {
        for field in &R::KIND.def().nullable {
            map.entry(field.clone()).or_insert(Value::Null);
        }
    }

    let mut record: R = serde_json::from_value(Value::Object(map))
        .map_err(|e| ArchiveError::schema(R::KIND, e.to_string()))?;
    record.post_resolve();
    Ok(record)
}

/// Resolve a payload for a kind only known at runtime.
pub fn resolve_record(kind: Kind, raw: &Value, shape: PayloadShape) -> Result<Record> {
    Ok(match kind {
        Kind::Document => Record::Document(resolve::<Document>(raw, shape)?),
        Kind::Collection => Record::Collection(resolve::<Collection>(raw, shape)?),
        Kind::Subject => Record::Subject(resolve::<Subject>(raw, shape)?),
        Kind::Coverage => Record::Coverage(resolve::<Coverage>(raw, shape)?),
        Kind::Contributor => Record::Contributor(resolve::<Contributor>(raw, shape)?),
        Kind::Repository => Record::Repository(resolve::<Repository>(raw, shape)?),
        Kind::Publisher => Record::Publisher(resolve::<Publisher>(raw, shape)?),
        Kind::Transcript => Record::Transcript(resolve::<Transcript>(raw, shape)?),
        Kind::Translation => Record::Translation(resolve::<Translation>(raw, shape)?),
        Kind::MediaFile => Record::MediaFile(resolve::<MediaFile>(raw, shape)?),
        Kind::Theme => Record::Theme(resolve::<Theme>(raw, shape)?),
        Kind::Language => Record::Language(resolve::<Language>(raw, shape)?),
        Kind::Donor => Record::Donor(resolve::<Donor>(raw, shape)?),
        Kind::Type => Record::Type(resolve::<Type>(raw, shape)?),
        Kind::Right => Record::Right(resolve::<Right>(raw, shape)?),
        Kind::Classification => Record::Classification(resolve::<Classification>(raw, shape)?),
    })
}

/// Serialize a record into a JSON mapping. Pending fields are omitted and
/// absent fields are `null`, so resolving the output reproduces the record.
pub fn serialize<R: Resource>(record: &R) -> Result<Value> {
    serde_json::to_value(record).map_err(|e| ArchiveError::schema(R::KIND, e.to_string()))
}

/// Merge a detail payload into `record`.
///
/// Fields in the payload overwrite the record's; fields the payload lacks
/// keep their current state. The record is only replaced once the merged
/// result resolves, so a bad payload leaves it untouched.
pub(crate) fn merge_detail<R: Resource>(record: &mut R, detail: &Value) -> Result<()> {
    let fresh: R = resolve(detail, PayloadShape::Detail)?;
    let mut merged = serialize(record)?;
    merge_values(&mut merged, serialize(&fresh)?);
    *record = resolve(&merged, PayloadShape::Summary)?;
    Ok(())
}

/// Deep-merge `incoming` into `current`.
///
/// Objects merge key by key. Lists whose elements all carry an `id` merge
/// element-wise by id, taking membership and order from `incoming`. Anything
/// else is replaced.
pub(crate) fn merge_values(current: &mut Value, incoming: Value) {
    match (current, incoming) {
        (Value::Object(current), Value::Object(incoming)) => merge_objects(current, incoming),
        (Value::Array(current), Value::Array(incoming)) if all_identified(&incoming) => {
            let mut previous = std::mem::take(current);
            for item in incoming {
                let position = previous
                    .iter()
                    .position(|old| old.get("id").is_some() && old.get("id") == item.get("id"));
                match position {
                    Some(index) => {
                        let mut old = previous.swap_remove(index);
                        merge_values(&mut old, item);
                        current.push(old);
                    },
                    None => current.push(item),
                }
            }
        },
        (current, incoming) => *current = incoming,
    }
}

fn merge_objects(current: &mut Map<String, Value>, incoming: Map<String, Value>) {
    for (key, value) in incoming {
        match current.get_mut(&key) {
            Some(existing) => merge_values(existing, value),
            None => {
                current.insert(key, value);
            },
        }
    }
}

fn all_identified(items: &[Value]) -> bool {
    items
        .iter()
        .all(|item| item.get("id").is_some_and(|id| !id.is_null()))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
