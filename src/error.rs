//! Error taxonomy
//!
//! Every fallible operation in the crate returns [`ArchiveError`]. Nothing is
//! retried or swallowed: errors surface to the direct caller of the operation
//! that triggered them.

use crate::model::Kind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ArchiveError>;

#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Bad search arguments. Raised before any request is made.
    #[error("invalid filter for {kind}: {message}")]
    InvalidFilter { kind: Kind, message: String },

    /// A payload did not have the shape the registry declares for its kind.
    #[error("unexpected {kind} payload: {message}")]
    Schema { kind: Kind, message: String },

    #[error("no {kind} matched {query}")]
    NotFound { kind: Kind, query: String },

    /// The service reported more results than it actually served.
    #[error("{kind} search returned an empty page {page} after {fetched} of {expected} items")]
    Pagination {
        kind: Kind,
        page: u32,
        fetched: usize,
        expected: usize,
    },

    #[error("cannot hydrate {kind} without an identifier")]
    UnidentifiedRecord { kind: Kind },

    /// Non-2xx response or transport failure.
    #[error("request to {url} failed: {reason}")]
    Remote {
        url: String,
        status: Option<u16>,
        reason: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ArchiveError {
    pub(crate) fn schema(kind: Kind, message: impl Into<String>) -> Self {
        Self::Schema {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn invalid_filter(kind: Kind, message: impl Into<String>) -> Self {
        Self::InvalidFilter {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn status(url: &str, status: u16) -> Self {
        Self::Remote {
            url: url.to_string(),
            status: Some(status),
            reason: format!("HTTP {}", status),
            source: None,
        }
    }

    pub(crate) fn transport(url: &str, source: reqwest::Error) -> Self {
        Self::Remote {
            url: url.to_string(),
            status: source.status().map(|s| s.as_u16()),
            reason: source.to_string(),
            source: Some(source),
        }
    }

    /// HTTP status carried by a [`ArchiveError::Remote`], if any.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => *status,
            _ => None,
        }
    }

    /// Stable machine-readable code for the error category.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidFilter { .. } => "INVALID_FILTER",
            Self::Schema { .. } => "SCHEMA",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Pagination { .. } => "PAGINATION",
            Self::UnidentifiedRecord { .. } => "UNIDENTIFIED_RECORD",
            Self::Remote { .. } => "REMOTE",
            Self::Config(_) => "CONFIG",
        }
    }
}

/// Format an error for display in the CLI.
///
/// Remote errors are reduced to a short hint keyed on the status code; the
/// request URL and response body only go to the log.
pub fn format_archive_error(error: &anyhow::Error) -> String {
    let Some(archive_error) = error.downcast_ref::<ArchiveError>() else {
        return truncate(&error.to_string());
    };

    match archive_error {
        ArchiveError::Remote {
            status: Some(404), ..
        } => "Record not found on the Digital Archive.".to_string(),
        ArchiveError::Remote {
            status: Some(429), ..
        } => "Rate limit exceeded. Please try again later.".to_string(),
        ArchiveError::Remote {
            status: Some(code), ..
        } if *code >= 500 => {
            "Digital Archive temporarily unavailable. Please try again.".to_string()
        },
        ArchiveError::Remote { status: None, .. } => {
            "Request failed. Check your network connection and try again.".to_string()
        },
        other => truncate(&other.to_string()),
    }
}

fn truncate(message: &str) -> String {
    let sanitized = message
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .take(120)
        .collect::<String>();

    if sanitized.len() < message.len() {
        format!("{}...", sanitized)
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_only_on_remote() {
        let err = ArchiveError::status("https://example.org/srv/record/1.json", 503);
        assert_eq!(err.http_status(), Some(503));
        assert_eq!(err.code(), "REMOTE");

        let err = ArchiveError::UnidentifiedRecord {
            kind: Kind::Document,
        };
        assert_eq!(err.http_status(), None);
    }

    #[test]
    fn test_format_hides_remote_details() {
        let err = anyhow::Error::new(ArchiveError::status("https://example.org/secret", 404));
        let message = format_archive_error(&err);
        assert!(!message.contains("secret"));
        assert!(message.contains("not found"));
    }

    #[test]
    fn test_format_keeps_filter_message() {
        let err = anyhow::Error::new(ArchiveError::invalid_filter(
            Kind::Subject,
            "colour is not a valid search term",
        ));
        assert!(format_archive_error(&err).contains("colour"));
    }
}
