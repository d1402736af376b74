//! HTTP transport for the archive's REST endpoints

use crate::error::{ArchiveError, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Maximum length of response body to log
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and drops control characters
fn sanitize_for_log(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let truncated = if text.chars().count() > MAX_LOG_BODY_LENGTH {
        let head: String = text.chars().take(MAX_LOG_BODY_LENGTH).collect();
        format!("{}... [truncated, {} bytes total]", head, body.len())
    } else {
        text.into_owned()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Transport settings
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub user_agent: String,
    pub timeout: Duration,
    pub accept_invalid_certs: bool,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            user_agent: format!("digitalarchive/{}", env!("CARGO_PKG_VERSION")),
            timeout: Duration::from_secs(crate::config::DEFAULT_TIMEOUT_SECS),
            accept_invalid_certs: false,
        }
    }
}

/// A response as received, whatever its status
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub url: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Fail with [`ArchiveError::Remote`] unless the status is 2xx
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            tracing::warn!(
                "Archive error: {} {} - {}",
                self.status,
                self.url,
                sanitize_for_log(&self.body)
            );
            Err(ArchiveError::status(&self.url, self.status))
        }
    }
}

/// HTTP client wrapper for archive requests
#[derive(Clone)]
pub struct ArchiveHttpClient {
    client: Client,
}

impl ArchiveHttpClient {
    /// Create a new HTTP client
    pub fn new(options: &HttpOptions) -> Result<Self> {
        let client = Client::builder()
            .user_agent(options.user_agent.as_str())
            .timeout(options.timeout)
            .danger_accept_invalid_certs(options.accept_invalid_certs)
            .build()
            .map_err(|e| ArchiveError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Issue one GET. Only transport failures are errors here; the status is
    /// returned to the caller.
    pub async fn get(&self, url: &str, params: &[(String, String)]) -> Result<RawResponse> {
        tracing::debug!("GET {} {:?}", url, params);

        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| ArchiveError::transport(url, e))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let final_url = response.url().to_string();
        let body = response
            .bytes()
            .await
            .map_err(|e| ArchiveError::transport(url, e))?
            .to_vec();

        tracing::debug!("{} {} ({} bytes)", status, final_url, body.len());

        Ok(RawResponse {
            url: final_url,
            status,
            content_type,
            body,
        })
    }

    /// GET and decode a JSON body. A body that is not valid JSON is reported
    /// as a remote failure; shape problems are left to the caller.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> Result<T> {
        let response = self.get(url, params).await?.error_for_status()?;
        serde_json::from_slice(&response.body).map_err(|e| {
            tracing::warn!(
                "Malformed JSON from {}: {}",
                response.url,
                sanitize_for_log(&response.body)
            );
            ArchiveError::Remote {
                url: response.url.clone(),
                status: Some(response.status),
                reason: format!("malformed JSON: {}", e),
                source: None,
            }
        })
    }
}
