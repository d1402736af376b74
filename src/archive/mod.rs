//! Digital Archive transport
//!
//! # Module Structure
//!
//! - [`client`] - Archive client: URL construction and typed requests
//! - [`http`] - HTTP utilities for the archive's REST endpoints
//!
//! # Example
//!
//! ```ignore
//! use digitalarchive::archive::ArchiveClient;
//!
//! async fn example() -> digitalarchive::error::Result<()> {
//!     let client = ArchiveClient::new("https://digitalarchive.wilsoncenter.org")?;
//!     let range = client.date_range().await?;
//!     println!("{} - {}", range.begin, range.end);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod http;

pub use client::{ArchiveClient, DateRange, SearchPage};
pub use http::{ArchiveHttpClient, HttpOptions, RawResponse};
