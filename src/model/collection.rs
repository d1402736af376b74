//! Collection - a curated set of documents on one topic
//!
//! The collection search and detail endpoints disagree on which fields they
//! return. Every field here tolerates absence in either payload shape and
//! stays pending rather than being read as null.

use super::field::{self, Field, Timestamp};
use super::{push_one, Kind, Nested, Record, Resource, Searchable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default, deserialize_with = "field::id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub slug: Field<String>,

    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub uri: Field<String>,
    #[serde(
        default,
        deserialize_with = "field::object_or_empty",
        skip_serializing_if = "Field::is_pending"
    )]
    pub parent: Field<Box<Collection>>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub model: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub value: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub description: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub short_description: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub main_src: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub thumb_src: Field<String>,
    /// Sent as a string by one endpoint and a number by the other
    #[serde(default, deserialize_with = "field::text", skip_serializing_if = "Field::is_pending")]
    pub no_of_documents: Field<String>,
    #[serde(default, deserialize_with = "field::text", skip_serializing_if = "Field::is_pending")]
    pub is_inactive: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub source_created_at: Field<Timestamp>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub source_updated_at: Field<Timestamp>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub first_published_at: Field<Timestamp>,
}

impl Collection {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

impl Resource for Collection {
    const KIND: Kind = Kind::Collection;

    fn id(&self) -> &str {
        &self.id
    }

    fn nested_mut(&mut self) -> Vec<Nested<'_>> {
        let mut out = Vec::new();
        push_one(&mut out, "parent", &mut self.parent);
        out
    }

    fn into_record(self) -> Record {
        Record::Collection(self)
    }
}

impl Searchable for Collection {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{resolve, PayloadShape};
    use serde_json::json;

    #[test]
    fn test_document_count_as_number_or_string() {
        for raw in [json!(12), json!("12")] {
            let collection: Collection =
                resolve(&json!({ "id": 1, "no_of_documents": raw }), PayloadShape::Detail).unwrap();
            assert_eq!(collection.no_of_documents, Field::Known("12".to_string()));
        }
    }

    #[test]
    fn test_parent_forms() {
        let nested: Collection = resolve(
            &json!({ "id": 2, "parent": { "id": 1, "name": "Cold War History" } }),
            PayloadShape::Detail,
        )
        .unwrap();
        let parent = nested.parent.known().unwrap();
        assert_eq!(parent.id, "1");
        assert!(parent.uri.is_pending());

        let root: Collection =
            resolve(&json!({ "id": 1, "parent": [] }), PayloadShape::Detail).unwrap();
        assert_eq!(root.parent, Field::Absent);

        let root: Collection =
            resolve(&json!({ "id": 1, "parent": null }), PayloadShape::Detail).unwrap();
        assert_eq!(root.parent, Field::Absent);
    }

    #[test]
    fn test_bad_timestamp_is_rejected() {
        let result = resolve::<Collection>(
            &json!({ "id": 1, "source_updated_at": "yesterday" }),
            PayloadShape::Summary,
        );
        assert!(result.is_err());
    }
}
