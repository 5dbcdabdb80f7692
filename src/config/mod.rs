//
//  generic-api
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! This module supplies the base URL of each backend deployment and the
//! directory exported reports are saved to. Settings live in a TOML file stored
//! in a platform-specific directory.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/gapi/config.toml`
//! - **macOS**: `~/Library/Application Support/gapi/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\gapi\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [apis]
//! ems = "https://ems.example.com"
//! ams = "https://ams.example.com"
//!
//! [export]
//! dir = "/home/me/Downloads"
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use generic_api::config::{Backend, Config};
//!
//! let mut config = Config::default();
//! config.set("apis.ams", "https://ams.example.com/").unwrap();
//!
//! assert_eq!(config.root_url(Backend::Ams), "https://ams.example.com/api");
//! // Unmapped identities fall back to `{identity}/api`
//! assert_eq!(config.root_url(Backend::Ems), "ems/api");
//! ```
//!
//! ## Submodules
//!
//! - [`file`]: Low-level configuration file I/O operations
//! - [`backends`]: Backend identities and base URL helpers

mod backends;
mod file;

pub use backends::*;
pub use file::*;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Suffix appended to every backend base URL.
pub const API_SUFFIX: &str = "api";

/// Keys accepted by [`Config::get`] and [`Config::set`].
pub const CONFIG_KEYS: [&str; 3] = ["apis.ems", "apis.ams", "export.dir"];

/// Global configuration container.
///
/// # Fields
///
/// * `apis` - Map of backend identity name to base URL
/// * `export` - Report export settings
///
/// # Notes
///
/// - All fields use `#[serde(default)]` so partial files load cleanly
/// - The file is created on first save
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL per backend identity name (`ems`, `ams`).
    #[serde(default)]
    pub apis: BTreeMap<String, String>,

    /// Report export settings.
    #[serde(default)]
    pub export: ExportConfig,
}

/// Report export settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory exported reports are written to. Defaults to the working directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl Config {
    /// Loads the configuration from the default location.
    ///
    /// A missing file yields the default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads the configuration from `path`, or defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if config_exists(path) {
            let content = read_config_file(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Returns the configured base URL of `backend`, if any.
    pub fn base_url(&self, backend: Backend) -> Option<&str> {
        self.apis
            .get(backend.as_str())
            .map(String::as_str)
            .filter(|url| !url.trim().is_empty())
    }

    /// Returns the API root of `backend`: `{base}/api`, or `{identity}/api`
    /// when no base URL is configured.
    pub fn root_url(&self, backend: Backend) -> String {
        match self.base_url(backend) {
            Some(base) => format!("{}/{}", normalize_base_url(base), API_SUFFIX),
            None => format!("{}/{}", backend, API_SUFFIX),
        }
    }

    /// Directory exported reports are saved to.
    pub fn export_dir(&self) -> PathBuf {
        self.export.dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "apis.ems" => self.base_url(Backend::Ems).map(str::to_string),
            "apis.ams" => self.base_url(Backend::Ams).map(str::to_string),
            "export.dir" => self.export.dir.as_ref().map(|d| d.display().to_string()),
            _ => None,
        }
    }

    /// Sets a configuration key, validating base URLs.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "apis.ems" | "apis.ams" => {
                let backend: Backend = key.trim_start_matches("apis.").parse()?;
                let url = validate_base_url(value)?;
                self.apis.insert(backend.as_str().to_string(), url);
            }
            "export.dir" => {
                self.export.dir = Some(PathBuf::from(value.trim()));
            }
            _ => bail!(
                "Unknown config key '{}'. Valid keys: {}",
                key,
                CONFIG_KEYS.join(", ")
            ),
        }
        Ok(())
    }

    /// Removes a configuration key. Returns `false` for unknown keys.
    pub fn unset(&mut self, key: &str) -> bool {
        match key {
            "apis.ems" | "apis.ams" => {
                self.apis.remove(key.trim_start_matches("apis."));
                true
            }
            "export.dir" => {
                self.export.dir = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_root_url_fallback() {
        let config = Config::default();
        assert_eq!(config.root_url(Backend::Ems), "ems/api");
        assert_eq!(config.root_url(Backend::Ams), "ams/api");
    }

    #[test]
    fn test_root_url_trims_trailing_slash() {
        let mut config = Config::default();
        config
            .apis
            .insert("ems".to_string(), "http://localhost:8080/".to_string());
        assert_eq!(config.root_url(Backend::Ems), "http://localhost:8080/api");
    }

    #[test]
    fn test_set_and_get() {
        let mut config = Config::default();
        config.set("apis.ams", "https://ams.example.com").unwrap();
        config.set("export.dir", "/tmp/reports").unwrap();
        assert_eq!(config.get("apis.ams").as_deref(), Some("https://ams.example.com"));
        assert_eq!(config.get("export.dir").as_deref(), Some("/tmp/reports"));
        assert!(config.set("apis.ams", "nope").is_err());
        assert!(config.set("colour", "blue").is_err());
        assert!(config.unset("apis.ams"));
        assert_eq!(config.get("apis.ams"), None);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("apis.ems", "https://ems.example.com").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let loaded = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, Config::default());
    }
}
