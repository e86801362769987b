//! Application configuration.
//!
//! Settings are read from an optional JSON file and may be overridden from
//! the environment. A missing file yields the defaults.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::util::normalize_text_option;
use crate::view::DEFAULT_PAGE_SIZE;
use crate::{Error, Result};

const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Environment variable overriding [`AppConfig::page_size`].
pub const PAGE_SIZE_ENV: &str = "NOTECAM_PAGE_SIZE";
/// Environment variable overriding [`AppConfig::query_change`].
pub const QUERY_CHANGE_ENV: &str = "NOTECAM_QUERY_CHANGE";

/// What the list view does with the current page when the search query changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueryChangePolicy {
    /// Stay on the current page, even if it is now past the end (renders empty).
    #[default]
    KeepPage,
    /// Jump back to page 1.
    ResetToFirst,
}

impl FromStr for QueryChangePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keep-page" => Ok(Self::KeepPage),
            "reset-to-first" => Ok(Self::ResetToFirst),
            other => Err(Error::InvalidInput(format!(
                "unknown query change policy '{other}' (expected keep-page or reset-to-first)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default = "default_config_version")]
    pub version: u32,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default)]
    pub query_change: QueryChangePolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_SCHEMA_VERSION,
            page_size: DEFAULT_PAGE_SIZE,
            query_change: QueryChangePolicy::default(),
        }
    }
}

const fn default_config_version() -> u32 {
    CONFIG_SCHEMA_VERSION
}

const fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl AppConfig {
    /// Load from `path`; a missing file yields the defaults.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        Self::parse(&raw).map_err(|error| match error {
            Error::Serialization(error) => {
                Error::Config(format!("failed to parse {}: {error}", path.display()))
            }
            other => other,
        })
    }

    /// Parse a JSON config payload.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut config = serde_json::from_str::<Self>(raw)?;
        if config.version != CONFIG_SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "unsupported config version {} (expected {CONFIG_SCHEMA_VERSION})",
                config.version
            )));
        }
        if config.page_size == 0 {
            return Err(Error::Config("page_size must be at least 1".to_string()));
        }
        Ok(config)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn apply_overrides_from(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<()> {
        if let Some(raw) = normalize_text_option(lookup(PAGE_SIZE_ENV)) {
            self.page_size = raw
                .parse::<usize>()
                .ok()
                .filter(|page_size| *page_size > 0)
                .ok_or_else(|| {
                    Error::Config(format!(
                        "{PAGE_SIZE_ENV} must be a positive integer, got '{raw}'"
                    ))
                })?;
        }
        if let Some(raw) = normalize_text_option(lookup(QUERY_CHANGE_ENV)) {
            self.query_change = raw.parse()?;
        }
        Ok(())
    }
}
