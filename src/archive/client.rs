//! Archive Client
//!
//! Main client for the Digital Archive, combining URL construction with the
//! HTTP transport. Search, detail, asset and date-range requests all go
//! through here.

use super::http::{ArchiveHttpClient, HttpOptions, RawResponse};
use crate::config::{Config, DEFAULT_ITEMS_PER_PAGE};
use crate::error::{ArchiveError, Result};
use crate::hydrate::Hydrator;
use crate::matching::{Filters, ResourceMatcher};
use crate::model::{CompactDate, Kind, Resource, Searchable};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Main archive client
#[derive(Clone)]
pub struct ArchiveClient {
    pub http: ArchiveHttpClient,
    base_url: String,
    items_per_page: u32,
}

/// One page of search results
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
    pub items: Vec<Value>,
    /// Total reported by the service; `None` for endpoints that do not paginate
    pub total: Option<usize>,
}

impl SearchPage {
    /// Accepts `{"list": [...], "pagination": {"totalItems": n}}` and
    /// `{"items": [...], "total": n}`.
    pub fn parse(kind: Kind, body: Value) -> Result<Self> {
        let Value::Object(mut map) = body else {
            return Err(ArchiveError::schema(kind, "search response is not an object"));
        };

        let items = match map.remove("list").or_else(|| map.remove("items")) {
            Some(Value::Array(items)) => items,
            Some(_) => return Err(ArchiveError::schema(kind, "search result list is not an array")),
            None => return Err(ArchiveError::schema(kind, "search response has no result list")),
        };

        let total = map
            .get("pagination")
            .and_then(|p| p.get("totalItems"))
            .or_else(|| map.get("total"))
            .map(|t| count_value(kind, t))
            .transpose()?;

        Ok(Self { items, total })
    }
}

fn count_value(kind: Kind, value: &Value) -> Result<usize> {
    let parsed = match value {
        Value::Number(n) => n.as_u64().map(|n| n as usize),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| ArchiveError::schema(kind, format!("bad result total: {}", value)))
}

/// Earliest and latest document dates held by the archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DateRange {
    pub begin: CompactDate,
    pub end: CompactDate,
}

impl ArchiveClient {
    /// Create a client with default transport settings
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_options(base_url, DEFAULT_ITEMS_PER_PAGE, &HttpOptions::default())
    }

    pub fn with_options(
        base_url: &str,
        items_per_page: u32,
        options: &HttpOptions,
    ) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| ArchiveError::Config(format!("invalid base URL '{}': {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ArchiveError::Config(format!(
                "base URL must be http or https, got '{}'",
                parsed.scheme()
            )));
        }
        if items_per_page == 0 {
            return Err(ArchiveError::Config("items per page must be at least 1".to_string()));
        }

        Ok(Self {
            http: ArchiveHttpClient::new(options)?,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            items_per_page,
        })
    }

    /// Create a client from stored configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let options = HttpOptions {
            user_agent: config.effective_user_agent(),
            timeout: Duration::from_secs(config.effective_timeout_secs()),
            accept_invalid_certs: config.effective_accept_invalid_certs(false),
        };
        Self::with_options(
            &config.effective_base_url(None),
            config.effective_items_per_page(None),
            &options,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn items_per_page(&self) -> u32 {
        self.items_per_page
    }

    // =========================================================================
    // URL helpers
    // =========================================================================

    fn endpoint(kind: Kind) -> Result<&'static str> {
        kind.def()
            .endpoint
            .as_deref()
            .ok_or_else(|| ArchiveError::schema(kind, "kind has no endpoint"))
    }

    /// Build search URL: `{base}/srv/{endpoint}.json`
    pub fn search_url(&self, kind: Kind) -> Result<String> {
        Ok(format!("{}/srv/{}.json", self.base_url, Self::endpoint(kind)?))
    }

    /// Build detail URL: `{base}/srv/{endpoint}/{key}.json`
    pub fn detail_url(&self, kind: Kind, key: &str) -> Result<String> {
        Ok(format!(
            "{}/srv/{}/{}.json",
            self.base_url,
            Self::endpoint(kind)?,
            urlencoding::encode(key)
        ))
    }

    /// Build content URL from a record's `url`/`path`; absolute URLs are kept
    pub fn content_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }

    /// Build asset URL: `{base}/srv/asset/{asset_id}`
    pub fn asset_url(&self, asset_id: &str) -> String {
        format!("{}/srv/asset/{}", self.base_url, urlencoding::encode(asset_id))
    }

    // =========================================================================
    // Requests
    // =========================================================================

    /// Fetch one page of search results (pages start at 1)
    pub async fn search_page(
        &self,
        kind: Kind,
        params: &[(String, String)],
        page: u32,
    ) -> Result<SearchPage> {
        let url = self.search_url(kind)?;
        let mut query = params.to_vec();
        query.push(("page".to_string(), page.to_string()));
        query.push(("itemsPerPage".to_string(), self.items_per_page.to_string()));

        let body: Value = self.http.get_json(&url, &query).await?;
        SearchPage::parse(kind, body)
    }

    /// Fetch a full record from the detail endpoint
    pub async fn detail(&self, kind: Kind, key: &str) -> Result<Value> {
        let url = self.detail_url(kind, key)?;
        self.http.get_json(&url, &[]).await
    }

    /// Download raw asset content
    pub async fn content(&self, url: &str) -> Result<RawResponse> {
        self.http.get(url, &[]).await?.error_for_status()
    }

    /// Earliest and latest document dates
    pub async fn date_range(&self) -> Result<DateRange> {
        let url = format!("{}/srv/record/date_range.json", self.base_url);
        let body: Value = self.http.get_json(&url, &[]).await?;
        serde_json::from_value(body)
            .map_err(|e| ArchiveError::schema(Kind::Document, e.to_string()))
    }

    /// Run a search; fetches the first page before returning
    pub async fn matcher<R: Searchable>(&self, filters: Filters) -> Result<ResourceMatcher<'_, R>> {
        ResourceMatcher::new(self, filters).await
    }

    /// Hydrate one record in place
    pub async fn hydrate<R: Resource>(&self, record: &mut R, recurse: bool) -> Result<()> {
        Hydrator::new(self).hydrate(record, recurse).await
    }
}
