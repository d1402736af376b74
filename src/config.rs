//! Configuration Management
//!
//! Handles persistent configuration storage for digitalarchive.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://digitalarchive.wilsoncenter.org";
pub const DEFAULT_ITEMS_PER_PAGE: u32 = 200;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Archive root, without the `/srv` suffix
    #[serde(default)]
    pub base_url: Option<String>,
    /// Search page size
    #[serde(default)]
    pub items_per_page: Option<u32>,
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Per-request timeout
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// The archive host has served an incomplete certificate chain before
    #[serde(default)]
    pub accept_invalid_certs: Option<bool>,
}

impl Config {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("digitalarchive").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content),
            Err(_) => Self::default(),
        }
    }

    fn parse(content: &str) -> Self {
        serde_json::from_str(content).unwrap_or_default()
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };

        // Create parent directory
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Get effective base URL (CLI > config > default)
    pub fn effective_base_url(&self, cli: Option<&str>) -> String {
        cli.map(str::to_string)
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Get effective page size (CLI > config > default)
    pub fn effective_items_per_page(&self, cli: Option<u32>) -> u32 {
        cli.or(self.items_per_page).unwrap_or(DEFAULT_ITEMS_PER_PAGE)
    }

    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("digitalarchive/{}", env!("CARGO_PKG_VERSION")))
    }

    pub fn effective_timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    pub fn effective_accept_invalid_certs(&self, cli: bool) -> bool {
        cli || self.accept_invalid_certs.unwrap_or(false)
    }

    /// Set base URL and save
    pub fn set_base_url(&mut self, base_url: &str) -> Result<()> {
        self.base_url = Some(base_url.to_string());
        self.save()
    }

    /// Set page size and save
    pub fn set_items_per_page(&mut self, items_per_page: u32) -> Result<()> {
        self.items_per_page = Some(items_per_page);
        self.save()
    }
}
