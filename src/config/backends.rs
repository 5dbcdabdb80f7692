//
//  generic-api
//  config/backends.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Backend Identity Module
//!
//! The client talks to one of two deployments of the same REST backend. They
//! share the envelope contract but differ in base URL and authentication header
//! conventions.
//!
//! | Identity | Access-token header carries | External-token header carries |
//! |----------|-----------------------------|-------------------------------|
//! | `ams` | primary access token | external token |
//! | `ems` | external token | (not sent) |
//!
//! ## Usage
//!
//! ```rust
//! use generic_api::config::{normalize_base_url, Backend};
//!
//! let backend: Backend = "ams".parse().unwrap();
//! assert_eq!(backend, Backend::Ams);
//! assert_eq!(backend.to_string(), "ams");
//!
//! assert_eq!(normalize_base_url(" https://ems.example.com/ "), "https://ems.example.com");
//! ```

use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Identity of a backend deployment.
///
/// Fixed per client instance at construction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// The `ems` deployment.
    #[default]
    Ems,
    /// The `ams` deployment.
    Ams,
}

impl Backend {
    /// The identity's configuration name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ems => "ems",
            Self::Ams => "ams",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "ems" => Ok(Self::Ems),
            "ams" => Ok(Self::Ams),
            other => bail!("Unknown backend '{}'. Expected 'ems' or 'ams'", other),
        }
    }
}

/// Trims whitespace and trailing slashes from a base URL.
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Normalizes a base URL and checks it is an absolute http(s) URL.
pub fn validate_base_url(url: &str) -> Result<String> {
    let normalized = normalize_base_url(url);
    let parsed = Url::parse(&normalized)?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("Unsupported URL scheme '{}' in {}", parsed.scheme(), normalized);
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_backend() {
        assert_eq!("EMS".parse::<Backend>().unwrap(), Backend::Ems);
        assert_eq!(" ams ".parse::<Backend>().unwrap(), Backend::Ams);
        assert!("xms".parse::<Backend>().is_err());
    }

    #[test]
    fn test_validate_base_url() {
        assert_eq!(
            validate_base_url("https://api.example.com//").unwrap(),
            "https://api.example.com"
        );
        assert!(validate_base_url("ftp://api.example.com").is_err());
        assert!(validate_base_url("not a url").is_err());
    }
}
