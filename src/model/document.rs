//! Document - a single record page on the archive

use super::field::{self, CompactDate, Field, Timestamp};
use super::{
    push_many, Classification, Collection, Contributor, Coverage, Donor, Kind, Language,
    MediaFile, Nested, Publisher, Record, Repository, Resource, Right, Searchable, Subject,
    Transcript, Translation, Type,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, deserialize_with = "field::id")]
    pub id: String,

    // Summary fields
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub uri: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub title: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub description: Field<String>,
    /// Creation date as the archive writes it (`YYYYMMDD`, sometimes approximate)
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub doc_date: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub frontend_doc_date: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub slug: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub source_created_at: Field<Timestamp>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub source_updated_at: Field<Timestamp>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub first_published_at: Field<Timestamp>,

    // Full fields
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub source: Field<String>,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "field::one_or_many",
        skip_serializing_if = "Field::is_pending"
    )]
    pub doc_type: Field<Vec<Type>>,
    #[serde(
        default,
        deserialize_with = "field::one_or_many",
        skip_serializing_if = "Field::is_pending"
    )]
    pub rights: Field<Vec<Right>>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub pdf_generated_at: Field<String>,
    /// Rounded-down date used for date-range matching
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub date_range_start: Field<CompactDate>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub sort_string_by_coverage: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub main_src: Field<Value>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub model: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub donors: Field<Vec<Donor>>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub subjects: Field<Vec<Subject>>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub transcripts: Field<Vec<Transcript>>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub translations: Field<Vec<Translation>>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub media_files: Field<Vec<MediaFile>>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub languages: Field<Vec<Language>>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub contributors: Field<Vec<Contributor>>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub creators: Field<Vec<Contributor>>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub original_coverages: Field<Vec<Coverage>>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub collections: Field<Vec<Collection>>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub attachments: Field<Vec<Document>>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub links: Field<Vec<Document>>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub repositories: Field<Vec<Repository>>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub publishers: Field<Vec<Publisher>>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub classifications: Field<Vec<Classification>>,
}

impl Document {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    fn link_assets(&mut self) {
        if self.id.is_empty() {
            return;
        }
        let parent = Some(self.id.clone());
        if let Some(items) = self.transcripts.known_mut() {
            items.iter_mut().for_each(|a| a.parent_id = parent.clone());
        }
        if let Some(items) = self.translations.known_mut() {
            items.iter_mut().for_each(|a| a.parent_id = parent.clone());
        }
        if let Some(items) = self.media_files.known_mut() {
            items.iter_mut().for_each(|a| a.parent_id = parent.clone());
        }
    }
}

impl Resource for Document {
    const KIND: Kind = Kind::Document;

    fn id(&self) -> &str {
        &self.id
    }

    fn post_resolve(&mut self) {
        self.link_assets();
    }

    fn nested_mut(&mut self) -> Vec<Nested<'_>> {
        let mut out = Vec::new();
        push_many(&mut out, "type", &mut self.doc_type);
        push_many(&mut out, "rights", &mut self.rights);
        push_many(&mut out, "donors", &mut self.donors);
        push_many(&mut out, "subjects", &mut self.subjects);
        push_many(&mut out, "transcripts", &mut self.transcripts);
        push_many(&mut out, "translations", &mut self.translations);
        push_many(&mut out, "media_files", &mut self.media_files);
        push_many(&mut out, "languages", &mut self.languages);
        push_many(&mut out, "contributors", &mut self.contributors);
        push_many(&mut out, "creators", &mut self.creators);
        push_many(&mut out, "original_coverages", &mut self.original_coverages);
        push_many(&mut out, "collections", &mut self.collections);
        push_many(&mut out, "attachments", &mut self.attachments);
        push_many(&mut out, "links", &mut self.links);
        push_many(&mut out, "repositories", &mut self.repositories);
        push_many(&mut out, "publishers", &mut self.publishers);
        push_many(&mut out, "classifications", &mut self.classifications);
        out
    }

    fn into_record(self) -> Record {
        Record::Document(self)
    }
}

impl Searchable for Document {}
