//! Resource kinds and the lazy object model
//!
//! Each kind of archive record is a concrete struct implementing [`Resource`].
//! Fields the archive only returns from a detail lookup start out as
//! [`Field::Pending`] and are filled in by hydration.
//!
//! # Module Structure
//!
//! - [`registry`] - Kind schemas loaded from embedded JSON
//! - [`field`] - Three-state fields and lenient value coercions
//! - [`resolve`] - Raw JSON → typed record conversion, serialization, merging
//! - [`document`], [`collection`], [`asset`], [`taxonomy`], [`theme`] - The kinds
//!
//! # Example
//!
//! ```ignore
//! use digitalarchive::model::{resolve, Document, PayloadShape, Resource};
//!
//! let doc: Document = resolve(&serde_json::json!({ "id": "112566" }), PayloadShape::Summary)?;
//! assert!(!doc.is_hydrated());
//! ```

pub mod asset;
pub mod collection;
pub mod document;
pub mod field;
pub mod registry;
pub mod resolve;
pub mod taxonomy;
pub mod theme;

pub use asset::{Asset, ContentFormat, MediaFile, Transcript, Translation};
pub use collection::Collection;
pub use document::Document;
pub use field::{CompactDate, Field, FieldState, Timestamp};
pub use registry::{get_registry, KindDef, NestedDef};
pub use resolve::{resolve, resolve_record, serialize, PayloadShape};
pub use taxonomy::{
    Classification, Contributor, Coverage, Donor, Language, Publisher, Repository, Right, Subject,
    Type,
};
pub use theme::Theme;

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// The closed set of resource kinds served by the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Document,
    Collection,
    Subject,
    Coverage,
    Contributor,
    Repository,
    Publisher,
    Transcript,
    Translation,
    MediaFile,
    Theme,
    Language,
    Donor,
    Type,
    Right,
    Classification,
}

impl Kind {
    pub const ALL: [Kind; 16] = [
        Kind::Document,
        Kind::Collection,
        Kind::Subject,
        Kind::Coverage,
        Kind::Contributor,
        Kind::Repository,
        Kind::Publisher,
        Kind::Transcript,
        Kind::Translation,
        Kind::MediaFile,
        Kind::Theme,
        Kind::Language,
        Kind::Donor,
        Kind::Type,
        Kind::Right,
        Kind::Classification,
    ];

    /// Registry key
    pub fn key(self) -> &'static str {
        match self {
            Kind::Document => "document",
            Kind::Collection => "collection",
            Kind::Subject => "subject",
            Kind::Coverage => "coverage",
            Kind::Contributor => "contributor",
            Kind::Repository => "repository",
            Kind::Publisher => "publisher",
            Kind::Transcript => "transcript",
            Kind::Translation => "translation",
            Kind::MediaFile => "media_file",
            Kind::Theme => "theme",
            Kind::Language => "language",
            Kind::Donor => "donor",
            Kind::Type => "type",
            Kind::Right => "right",
            Kind::Classification => "classification",
        }
    }

    /// Schema for this kind
    pub fn def(self) -> &'static KindDef {
        // get_registry() checks every kind has an entry
        &get_registry().kinds[self.key()]
    }

    pub fn from_key(key: &str) -> Option<Kind> {
        Kind::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.def().display_name)
    }
}

/// Capabilities shared by every resource kind.
pub trait Resource:
    Serialize + DeserializeOwned + Clone + PartialEq + fmt::Debug + Send + Sync + 'static
{
    const KIND: Kind;

    /// Identifier assigned by the archive. Empty when the payload carried none.
    fn id(&self) -> &str;

    /// Key used to build the detail URL.
    fn lookup_key(&self) -> &str {
        self.id()
    }

    /// Fix-ups applied after every resolve (including after a merge).
    fn post_resolve(&mut self) {}

    /// Nested resources currently held by the record.
    fn nested_mut(&mut self) -> Vec<Nested<'_>> {
        Vec::new()
    }

    fn as_asset_mut(&mut self) -> Option<&mut dyn Asset> {
        None
    }

    /// Look a field up by name.
    fn field(&self, name: &str) -> FieldState {
        if !Self::KIND.def().declares(name) {
            return FieldState::NotApplicable;
        }
        match serialize(self) {
            Ok(Value::Object(map)) => match map.get(name) {
                Some(value) => FieldState::Populated(value.clone()),
                None => FieldState::Unhydrated,
            },
            _ => FieldState::Unhydrated,
        }
    }

    /// True once every full field is populated.
    fn is_hydrated(&self) -> bool {
        let Ok(Value::Object(map)) = serialize(self) else {
            return false;
        };
        Self::KIND
            .def()
            .full_fields
            .iter()
            .all(|field| map.contains_key(field))
    }

    /// Names of the full fields still pending.
    fn pending_fields(&self) -> Vec<&'static str> {
        let map = match serialize(self) {
            Ok(Value::Object(map)) => map,
            _ => Default::default(),
        };
        Self::KIND
            .def()
            .full_fields
            .iter()
            .filter(|field| !map.contains_key(field.as_str()))
            .map(String::as_str)
            .collect()
    }

    fn into_record(self) -> Record;
}

/// Kinds with a search endpoint.
pub trait Searchable: Resource {}

/// A nested resource reachable from a parent record.
pub struct Nested<'a> {
    pub field: &'static str,
    pub node: &'a mut dyn Node,
}

/// Object-safe view of a record used when walking nested resources.
pub trait Node: Send {
    fn kind(&self) -> Kind;
    fn key(&self) -> &str;
    /// Merge a detail payload into the record (last write wins).
    fn merge_detail(&mut self, detail: &Value) -> Result<()>;
    fn children(&mut self) -> Vec<Nested<'_>>;
    fn asset(&mut self) -> Option<&mut dyn Asset>;
}

impl<R: Resource> Node for R {
    fn kind(&self) -> Kind {
        R::KIND
    }

    fn key(&self) -> &str {
        self.lookup_key()
    }

    fn merge_detail(&mut self, detail: &Value) -> Result<()> {
        resolve::merge_detail(self, detail)
    }

    fn children(&mut self) -> Vec<Nested<'_>> {
        self.nested_mut()
    }

    fn asset(&mut self) -> Option<&mut dyn Asset> {
        self.as_asset_mut()
    }
}

pub(crate) fn push_many<'a, R: Resource>(
    out: &mut Vec<Nested<'a>>,
    field: &'static str,
    items: &'a mut Field<Vec<R>>,
) {
    if let Some(items) = items.known_mut() {
        out.extend(items.iter_mut().map(|item| Nested {
            field,
            node: item as &mut dyn Node,
        }));
    }
}

pub(crate) fn push_one<'a, R: Resource>(
    out: &mut Vec<Nested<'a>>,
    field: &'static str,
    item: &'a mut Field<Box<R>>,
) {
    if let Some(item) = item.known_mut() {
        out.push(Nested {
            field,
            node: item.as_mut() as &mut dyn Node,
        });
    }
}

/// Any record, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Document(Document),
    Collection(Collection),
    Subject(Subject),
    Coverage(Coverage),
    Contributor(Contributor),
    Repository(Repository),
    Publisher(Publisher),
    Transcript(Transcript),
    Translation(Translation),
    MediaFile(MediaFile),
    Theme(Theme),
    Language(Language),
    Donor(Donor),
    Type(Type),
    Right(Right),
    Classification(Classification),
}

macro_rules! each_record {
    ($record:expr, $inner:ident => $body:expr) => {
        match $record {
            Record::Document($inner) => $body,
            Record::Collection($inner) => $body,
            Record::Subject($inner) => $body,
            Record::Coverage($inner) => $body,
            Record::Contributor($inner) => $body,
            Record::Repository($inner) => $body,
            Record::Publisher($inner) => $body,
            Record::Transcript($inner) => $body,
            Record::Translation($inner) => $body,
            Record::MediaFile($inner) => $body,
            Record::Theme($inner) => $body,
            Record::Language($inner) => $body,
            Record::Donor($inner) => $body,
            Record::Type($inner) => $body,
            Record::Right($inner) => $body,
            Record::Classification($inner) => $body,
        }
    };
}

impl Record {
    pub fn kind(&self) -> Kind {
        each_record!(self, r => Node::kind(r))
    }

    pub fn id(&self) -> &str {
        each_record!(self, r => r.id())
    }

    pub fn field(&self, name: &str) -> FieldState {
        each_record!(self, r => r.field(name))
    }

    pub fn is_hydrated(&self) -> bool {
        each_record!(self, r => r.is_hydrated())
    }

    pub fn to_value(&self) -> Result<Value> {
        each_record!(self, r => serialize(r))
    }

    pub fn as_node_mut(&mut self) -> &mut dyn Node {
        each_record!(self, r => r as &mut dyn Node)
    }
}
