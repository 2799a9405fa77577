//! Configuration management for commenttree.
//!
//! Handles:
//! - Backend location and request timeout
//! - View defaults (sort order, page sizes, stale-response handling)
//! - Theme settings

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CommentTreeError, Result};
use crate::model::SortOrder;
use crate::util::atomic_write;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// View defaults.
    #[serde(default)]
    pub view: ViewConfig,
    /// TUI theme.
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Config {
    /// Load configuration from the default location, or defaults if absent.
    pub fn load() -> Result<Self> {
        let config_path = default_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CommentTreeError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            CommentTreeError::io(format!("Failed to read config file: {}", path.display()), e)
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| CommentTreeError::InvalidConfig {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot reject on its own.
    pub fn validate(&self) -> Result<()> {
        if self.view.root_page_size == 0 || self.view.search_page_size == 0 {
            return Err(CommentTreeError::InvalidConfig {
                message: "page sizes must be greater than zero".to_string(),
            });
        }
        if self.view.sort == SortOrder::RankDesc {
            return Err(CommentTreeError::InvalidConfig {
                message: "view.sort must be a tree order (created_at_desc or created_at_asc)".to_string(),
            });
        }
        if !self.server.base_url.starts_with("http://") && !self.server.base_url.starts_with("https://") {
            return Err(CommentTreeError::InvalidConfig {
                message: format!("server.base_url must be an http(s) URL, got {:?}", self.server.base_url),
            });
        }
        Ok(())
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        let config_path = default_config_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to a specific path.
    ///
    /// The config is written to a temporary file first, then atomically
    /// renamed to the target path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| CommentTreeError::InvalidConfig {
            message: format!("Failed to serialize config: {e}"),
        })?;

        atomic_write(path, content.as_bytes())?;

        Ok(())
    }
}

/// Backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the comment service.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// View configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Initial tree order.
    #[serde(default)]
    pub sort: SortOrder,
    /// Number of top-level comments requested per listing.
    #[serde(default = "default_root_page_size")]
    pub root_page_size: u32,
    /// Number of hits requested per search.
    #[serde(default = "default_search_page_size")]
    pub search_page_size: u32,
    /// Drop tree/search responses superseded by a newer request.
    #[serde(default = "default_true")]
    pub discard_stale_responses: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            sort: SortOrder::default(),
            root_page_size: default_root_page_size(),
            search_page_size: default_search_page_size(),
            discard_stale_responses: true,
        }
    }
}

/// Theme configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Theme name.
    #[serde(default = "default_theme")]
    pub name: String,
    /// Use Unicode box-drawing characters.
    #[serde(default = "default_true")]
    pub unicode: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme(),
            unicode: true,
        }
    }
}

// Default value functions for serde
fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_root_page_size() -> u32 {
    50
}

fn default_search_page_size() -> u32 {
    20
}

fn default_theme() -> String {
    "dark".to_string()
}

/// Get the default configuration path.
pub fn default_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().ok_or_else(|| CommentTreeError::Unsupported {
        feature: "config directory discovery".to_string(),
    })?;

    Ok(config_dir.join("commenttree").join("config.toml"))
}
