//! Keyword-filter search over the archive
//!
//! # Module Structure
//!
//! - [`filters`] - Filter values, validation and query parameter generation
//! - [`matcher`] - Lazy paginated result sets
//!
//! # Example
//!
//! ```ignore
//! use digitalarchive::matching::Filters;
//! use digitalarchive::model::Document;
//! use futures::TryStreamExt;
//!
//! let matcher = client.matcher::<Document>(Filters::new().text("name", "soviet")).await?;
//! let mut docs = matcher.all();
//! while let Some(doc) = docs.try_next().await? {
//!     println!("{} {:?}", doc.id, doc.title);
//! }
//! ```

pub mod filters;
pub mod matcher;

pub use filters::{normalize, FilterValue, Filters, Query};
pub use matcher::ResourceMatcher;
