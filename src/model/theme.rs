//! Theme - a container of collections on one geopolitical topic
//!
//! Themes are looked up by `slug`, not `id`. They never appear nested in
//! another record but can be used as a document search filter.

use super::field::{self, Field};
use super::{push_many, Collection, Kind, Nested, Record, Resource};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default, deserialize_with = "field::id")]
    pub id: String,
    #[serde(default, deserialize_with = "field::id")]
    pub slug: String,

    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub title: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub value: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub description: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub main_src: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub uri: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub featured_resources: Field<Vec<Value>>,
    #[serde(default, deserialize_with = "field::text", skip_serializing_if = "Field::is_pending")]
    pub has_map: Field<String>,
    #[serde(default, deserialize_with = "field::text", skip_serializing_if = "Field::is_pending")]
    pub has_timeline: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub featured_collections: Field<Vec<Collection>>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub dates_with_events: Field<Vec<Value>>,
}

impl Theme {
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            ..Default::default()
        }
    }
}

impl Resource for Theme {
    const KIND: Kind = Kind::Theme;

    fn id(&self) -> &str {
        &self.id
    }

    fn lookup_key(&self) -> &str {
        &self.slug
    }

    fn nested_mut(&mut self) -> Vec<Nested<'_>> {
        let mut out = Vec::new();
        push_many(&mut out, "featured_collections", &mut self.featured_collections);
        out
    }

    fn into_record(self) -> Record {
        Record::Theme(self)
    }
}
