//! Read-only client and object mapper for the Wilson Center Digital Archive.
//!
//! Searches return records with only their summary fields filled in; the
//! rest stay [`Field::Pending`](model::Field::Pending) until the record is
//! hydrated.
//!
//! ```ignore
//! use digitalarchive::{ArchiveClient, Filters};
//! use digitalarchive::model::Document;
//!
//! let client = ArchiveClient::new("https://digitalarchive.wilsoncenter.org")?;
//! let matcher = client.matcher::<Document>(Filters::new().text("name", "soviet")).await?;
//! let mut doc = matcher.first()?;
//! client.hydrate(&mut doc, true).await?;
//! ```

pub mod archive;
pub mod config;
pub mod error;
pub mod hydrate;
pub mod matching;
pub mod model;

pub use archive::ArchiveClient;
pub use config::Config;
pub use error::{ArchiveError, Result};
pub use hydrate::Hydrator;
pub use matching::{FilterValue, Filters, ResourceMatcher};
