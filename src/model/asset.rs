//! Asset kinds: transcripts, translations and scanned media files
//!
//! Assets carry two layers. The metadata record comes from the asset's detail
//! endpoint like any other kind; the content is a separate download whose
//! format is taken from the metadata. The downloaded bytes are kept in `raw`
//! whatever the format, alongside the decoded `html` or `pdf`.

use super::field::{self, Field, Timestamp};
use super::{push_one, Kind, Language, Nested, Record, Resource};
use serde::{Deserialize, Serialize};

/// Content format of an asset download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    Html,
    Pdf,
}

impl ContentFormat {
    /// Pick the format from the metadata `extension`, falling back to
    /// `content_type`. Never guessed from the bytes themselves.
    pub fn detect(extension: Option<&str>, content_type: Option<&str>) -> Option<Self> {
        let by_extension = extension.and_then(|ext| {
            match ext.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
                "html" | "htm" => Some(Self::Html),
                "pdf" => Some(Self::Pdf),
                _ => None,
            }
        });

        by_extension.or_else(|| {
            let mime = content_type?.to_ascii_lowercase();
            if mime.starts_with("text/html") {
                Some(Self::Html)
            } else if mime.starts_with("application/pdf") {
                Some(Self::Pdf)
            } else {
                None
            }
        })
    }
}

/// Operations the hydrator needs on an asset record.
pub trait Asset: Send {
    fn asset_id(&self) -> Option<&str>;

    /// Download location relative to the archive root, if the metadata has one.
    fn content_path(&self) -> Option<&str>;

    fn extension(&self) -> Option<&str>;

    fn content_type(&self) -> Option<&str>;

    /// Store downloaded bytes as `format`. The other format is marked absent.
    fn store_content(&mut self, format: ContentFormat, raw: Vec<u8>);

    fn format(&self) -> Option<ContentFormat> {
        ContentFormat::detect(self.extension(), self.content_type())
    }
}

fn non_empty(field: &Field<String>) -> Option<&str> {
    field.known().map(String::as_str).filter(|s| !s.trim().is_empty())
}

macro_rules! impl_asset {
    ($ty:ident, $locator:ident) => {
        impl Asset for $ty {
            fn asset_id(&self) -> Option<&str> {
                non_empty(&self.asset_id)
            }

            fn content_path(&self) -> Option<&str> {
                non_empty(&self.$locator)
            }

            fn extension(&self) -> Option<&str> {
                non_empty(&self.extension)
            }

            fn content_type(&self) -> Option<&str> {
                non_empty(&self.content_type)
            }

            fn store_content(&mut self, format: ContentFormat, raw: Vec<u8>) {
                match format {
                    ContentFormat::Html => {
                        self.html = Field::Known(String::from_utf8_lossy(&raw).into_owned());
                        self.pdf = Field::Absent;
                    },
                    ContentFormat::Pdf => {
                        self.pdf = Field::Known(raw.clone());
                        self.html = Field::Absent;
                    },
                }
                self.raw = Field::Known(raw);
            }
        }

        impl $ty {
            pub fn new(id: impl Into<String>) -> Self {
                Self {
                    id: id.into(),
                    ..Default::default()
                }
            }
        }
    };
}

/// A transcript of a document in its original language.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    #[serde(default, deserialize_with = "field::id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub filename: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub content_type: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub extension: Field<String>,
    /// Key on the content server, distinct from `id`
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub asset_id: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub source_created_at: Field<Timestamp>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub source_updated_at: Field<Timestamp>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub url: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub html: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub pdf: Field<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub raw: Field<Vec<u8>>,
    /// Document this transcript belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl_asset!(Transcript, url);

impl Resource for Transcript {
    const KIND: Kind = Kind::Transcript;

    fn id(&self) -> &str {
        &self.id
    }

    fn as_asset_mut(&mut self) -> Option<&mut dyn Asset> {
        Some(self as &mut dyn Asset)
    }

    fn into_record(self) -> Record {
        Record::Transcript(self)
    }
}

/// A translation of a document into another language.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    #[serde(default, deserialize_with = "field::id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub filename: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub content_type: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub extension: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub asset_id: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub source_created_at: Field<Timestamp>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub source_updated_at: Field<Timestamp>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub url: Field<String>,
    #[serde(
        default,
        deserialize_with = "field::object_or_empty",
        skip_serializing_if = "Field::is_pending"
    )]
    pub language: Field<Box<Language>>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub html: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub pdf: Field<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub raw: Field<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl_asset!(Translation, url);

impl Resource for Translation {
    const KIND: Kind = Kind::Translation;

    fn id(&self) -> &str {
        &self.id
    }

    fn nested_mut(&mut self) -> Vec<Nested<'_>> {
        let mut out = Vec::new();
        push_one(&mut out, "language", &mut self.language);
        out
    }

    fn as_asset_mut(&mut self) -> Option<&mut dyn Asset> {
        Some(self as &mut dyn Asset)
    }

    fn into_record(self) -> Record {
        Record::Translation(self)
    }
}

/// An original scan of a document. Located by `path` rather than `url`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaFile {
    #[serde(default, deserialize_with = "field::id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub filename: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub content_type: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub extension: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub asset_id: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub source_created_at: Field<Timestamp>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub source_updated_at: Field<Timestamp>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub path: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub html: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub pdf: Field<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub raw: Field<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl_asset!(MediaFile, path);

impl Resource for MediaFile {
    const KIND: Kind = Kind::MediaFile;

    fn id(&self) -> &str {
        &self.id
    }

    fn as_asset_mut(&mut self) -> Option<&mut dyn Asset> {
        Some(self as &mut dyn Asset)
    }

    fn into_record(self) -> Record {
        Record::MediaFile(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{resolve, serialize, PayloadShape};
    use serde_json::json;

    #[test]
    fn test_format_from_extension_then_content_type() {
        assert_eq!(ContentFormat::detect(Some("HTML"), None), Some(ContentFormat::Html));
        assert_eq!(
            ContentFormat::detect(Some(".pdf"), Some("text/html")),
            Some(ContentFormat::Pdf)
        );
        assert_eq!(
            ContentFormat::detect(Some("bin"), Some("application/pdf")),
            Some(ContentFormat::Pdf)
        );
        assert_eq!(
            ContentFormat::detect(None, Some("text/html; charset=utf-8")),
            Some(ContentFormat::Html)
        );
        assert_eq!(ContentFormat::detect(Some("docx"), Some("application/msword")), None);
        assert_eq!(ContentFormat::detect(None, None), None);
    }

    #[test]
    fn test_store_content_marks_other_format_absent() {
        let mut transcript = Transcript::new("1");
        transcript.store_content(ContentFormat::Html, b"<p>hi</p>".to_vec());
        assert_eq!(transcript.html, Field::Known("<p>hi</p>".to_string()));
        assert_eq!(transcript.pdf, Field::Absent);

        transcript.store_content(ContentFormat::Pdf, b"%PDF".to_vec());
        assert_eq!(transcript.html, Field::Absent);
        assert_eq!(transcript.raw, Field::Known(b"%PDF".to_vec()));
        assert!(transcript.is_hydrated());
    }

    #[test]
    fn test_raw_keeps_exact_html_bytes() {
        let bytes = b"<p>caf\xe9</p>".to_vec();
        let mut transcript = Transcript::new("1");
        transcript.store_content(ContentFormat::Html, bytes.clone());

        assert_eq!(transcript.raw, Field::Known(bytes));
        assert_eq!(transcript.html, Field::Known("<p>caf\u{fffd}</p>".to_string()));
    }

    #[test]
    fn test_media_file_located_by_path() {
        let media: MediaFile = resolve(
            &json!({
                "id": 5,
                "path": "/download/scan.pdf",
                "url": "/ignored",
                "extension": "pdf"
            }),
            PayloadShape::Summary,
        )
        .unwrap();
        assert_eq!(media.content_path(), Some("/download/scan.pdf"));
        assert_eq!(media.format(), Some(ContentFormat::Pdf));
    }

    #[test]
    fn test_blank_locator_is_none() {
        let transcript: Transcript =
            resolve(&json!({ "id": 5, "url": "", "asset_id": " " }), PayloadShape::Summary)
                .unwrap();
        assert_eq!(transcript.content_path(), None);
        assert_eq!(transcript.asset_id(), None);
    }

    #[test]
    fn test_hydrated_pdf_round_trips() {
        let mut translation: Translation = resolve(
            &json!({ "id": 9, "language": { "id": "eng", "name": "English" }, "extension": "pdf" }),
            PayloadShape::Summary,
        )
        .unwrap();
        translation.parent_id = Some("100".to_string());
        translation.store_content(ContentFormat::Pdf, vec![0x25, 0x50, 0x44, 0x46]);

        let again: Translation =
            resolve(&serialize(&translation).unwrap(), PayloadShape::Detail).unwrap();
        assert_eq!(again, translation);
    }
}
