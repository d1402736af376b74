//! Descriptive kinds attached to documents: subjects, places, people,
//! holding institutions and the small reference vocabularies.

use super::field::{self, Field};
use super::{push_many, push_one, Kind, Nested, Record, Resource, Searchable};
use serde::{Deserialize, Serialize};

macro_rules! impl_resource {
    ($ty:ident) => {
        impl $ty {
            pub fn new(id: impl Into<String>) -> Self {
                Self {
                    id: id.into(),
                    ..Default::default()
                }
            }
        }

        impl Resource for $ty {
            const KIND: Kind = Kind::$ty;

            fn id(&self) -> &str {
                &self.id
            }

            fn into_record(self) -> Record {
                Record::$ty(self)
            }
        }
    };
}

/// A historical topic documents are tagged with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(default, deserialize_with = "field::id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub name: Field<String>,
    /// Alias of `name`
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub value: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub uri: Field<String>,
}

impl_resource!(Subject);
impl Searchable for Subject {}

/// A person or organization involved in creating a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contributor {
    #[serde(default, deserialize_with = "field::id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub value: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub uri: Field<String>,
}

impl_resource!(Contributor);
impl Searchable for Contributor {}

/// The archive or library holding the physical original.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    #[serde(default, deserialize_with = "field::id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub uri: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub value: Field<String>,
}

impl_resource!(Repository);
impl Searchable for Repository {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Publisher {
    #[serde(default, deserialize_with = "field::id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub value: Field<String>,
}

impl_resource!(Publisher);
impl Searchable for Publisher {}

/// A geographic area referenced by a document.
///
/// Coverages form a tree. The service sends `parent` as an object, `null`
/// or `[]` depending on the endpoint; the last two both mean "no parent".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coverage {
    #[serde(default, deserialize_with = "field::id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub uri: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub value: Field<String>,
    #[serde(
        default,
        deserialize_with = "field::object_or_empty",
        skip_serializing_if = "Field::is_pending"
    )]
    pub parent: Field<Box<Coverage>>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub children: Field<Vec<Coverage>>,
}

impl Coverage {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

impl Resource for Coverage {
    const KIND: Kind = Kind::Coverage;

    fn id(&self) -> &str {
        &self.id
    }

    fn nested_mut(&mut self) -> Vec<Nested<'_>> {
        let mut out = Vec::new();
        push_one(&mut out, "parent", &mut self.parent);
        push_many(&mut out, "children", &mut self.children);
        out
    }

    fn into_record(self) -> Record {
        Record::Coverage(self)
    }
}

impl Searchable for Coverage {}

/// Original language of a document. The id is an ISO 639-2/B code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Language {
    #[serde(default, deserialize_with = "field::id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub name: Field<String>,
}

impl_resource!(Language);

/// An entity whose funding supported acquiring or translating a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Donor {
    #[serde(default, deserialize_with = "field::id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub name: Field<String>,
}

impl_resource!(Donor);

/// Document type (memo, report, minutes...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Type {
    #[serde(default, deserialize_with = "field::id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub name: Field<String>,
}

impl_resource!(Type);

/// Copyright notice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Right {
    #[serde(default, deserialize_with = "field::id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub rights: Field<String>,
}

impl_resource!(Right);

/// Security classification marking on the original.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    #[serde(default, deserialize_with = "field::id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Field::is_pending")]
    pub name: Field<String>,
}

impl_resource!(Classification);
