//
//  generic-api
//  api/export.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Report Export Support
//!
//! Report endpoints answer with a binary body (usually a spreadsheet) instead of
//! a JSON envelope. This module holds the pure parts of handling such a
//! response and the capability that finally hands the bytes to the user.
//!
//! ## Components
//!
//! - [`resolve_content_type`]: MIME type of the saved file
//! - [`resolve_file_name`]: Filename from `Content-Disposition`, with caller override
//! - [`FileSaver`]: "save bytes as file" capability
//! - [`DirectorySaver`]: Writes files into a directory
//!
//! ## Example
//!
//! ```rust
//! use generic_api::api::export::resolve_file_name;
//!
//! let header = Some(r#"attachment; filename="Q1.xlsx""#);
//! assert_eq!(resolve_file_name(header, None), "Q1.xlsx");
//! assert_eq!(resolve_file_name(header, Some("custom")), "custom");
//! assert_eq!(resolve_file_name(None, None), "report");
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::{HeaderMap, CONTENT_DISPOSITION, CONTENT_TYPE};
use serde::Serialize;

/// MIME type assumed when the response carries no content type.
pub const DEFAULT_REPORT_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Filename used when the response names none and the caller gave none.
pub const DEFAULT_REPORT_NAME: &str = "report";

/// `filename=value`, `filename="value"` or `filename='value'`, also matching
/// decorated parameter names such as `filename*`.
static FILENAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"filename[^;=\n]*=(?:"([^"\n]*)"|'([^'\n]*)'|([^;\n]*))"#).unwrap()
});

/// Returns the content type of the response, or the spreadsheet MIME type.
pub fn resolve_content_type(headers: &HeaderMap) -> String {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(DEFAULT_REPORT_CONTENT_TYPE)
        .to_string()
}

/// Returns the raw `Content-Disposition` header of the response.
///
/// Header lookup is case-insensitive.
pub fn content_disposition(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(CONTENT_DISPOSITION)
        .and_then(|value| value.to_str().ok())
}

/// Resolves the name of the saved file.
///
/// A non-empty `report_name` wins. Otherwise the filename is extracted from the
/// disposition header, falling back to `"report"`. Double quotes are stripped
/// from the result.
pub fn resolve_file_name(disposition: Option<&str>, report_name: Option<&str>) -> String {
    let from_header = disposition
        .and_then(|header| FILENAME_PATTERN.captures(header))
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)))
        .map(|m| m.as_str().trim())
        .filter(|name| !name.is_empty());

    let name = match report_name.filter(|name| !name.is_empty()) {
        Some(name) => name,
        None => from_header.unwrap_or(DEFAULT_REPORT_NAME),
    };

    name.replace('"', "")
}

/// Description of an exported report handed to a [`FileSaver`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedReport {
    /// Name the file was saved under.
    pub file_name: String,
    /// MIME type of the file.
    pub content_type: String,
    /// Size of the file in bytes.
    pub size: usize,
}

/// Capability that persists downloaded bytes for the user.
///
/// The client resolves the name and MIME type; implementations only decide
/// where and how the bytes end up.
#[async_trait]
pub trait FileSaver: Send + Sync {
    async fn save_bytes_as_file(&self, bytes: &[u8], file_name: &str, mime_type: &str)
        -> Result<()>;
}

/// Saves reports as files inside a directory.
///
/// Path components in the resolved name are discarded, so a hostile
/// `Content-Disposition` cannot write outside the directory.
#[derive(Debug, Clone)]
pub struct DirectorySaver {
    dir: PathBuf,
}

impl Default for DirectorySaver {
    fn default() -> Self {
        Self::new(".")
    }
}

impl DirectorySaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the path a file named `file_name` is written to.
    pub fn target_path(&self, file_name: &str) -> PathBuf {
        let base = Path::new(file_name)
            .file_name()
            .and_then(|name| name.to_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_REPORT_NAME);
        self.dir.join(base)
    }
}

#[async_trait]
impl FileSaver for DirectorySaver {
    async fn save_bytes_as_file(
        &self,
        bytes: &[u8],
        file_name: &str,
        mime_type: &str,
    ) -> Result<()> {
        let path = self.target_path(file_name);
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!("Saved {} ({}, {} bytes)", path.display(), mime_type, bytes.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;
    use tempfile::TempDir;

    #[test]
    fn test_file_name_from_quoted_header() {
        let header = Some(r#"attachment; filename="Q1.xlsx""#);
        assert_eq!(resolve_file_name(header, None), "Q1.xlsx");
    }

    #[test]
    fn test_file_name_from_unquoted_header() {
        let header = Some("attachment; filename=sales 2024.csv; size=120");
        assert_eq!(resolve_file_name(header, None), "sales 2024.csv");
    }

    #[test]
    fn test_file_name_from_single_quoted_header() {
        let header = Some("attachment; filename='q2.xlsx'");
        assert_eq!(resolve_file_name(header, None), "q2.xlsx");
    }

    #[test]
    fn test_report_name_overrides_header() {
        let header = Some(r#"attachment; filename="Q1.xlsx""#);
        assert_eq!(resolve_file_name(header, Some("custom")), "custom");
        assert_eq!(resolve_file_name(header, Some("")), "Q1.xlsx");
        assert_eq!(resolve_file_name(None, Some(r#""quoted""#)), "quoted");
    }

    #[test]
    fn test_default_file_name() {
        assert_eq!(resolve_file_name(None, None), "report");
        assert_eq!(resolve_file_name(Some("inline"), None), "report");
        assert_eq!(resolve_file_name(Some("attachment; filename="), None), "report");
    }

    #[test]
    fn test_content_type_default() {
        let mut headers = HeaderMap::new();
        assert_eq!(resolve_content_type(&headers), DEFAULT_REPORT_CONTENT_TYPE);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/csv"));
        assert_eq!(resolve_content_type(&headers), "text/csv");
    }

    #[test]
    fn test_target_path_strips_directories() {
        let saver = DirectorySaver::new("/reports");
        assert_eq!(saver.target_path("../../etc/passwd"), PathBuf::from("/reports/passwd"));
        assert_eq!(saver.target_path(".."), PathBuf::from("/reports/report"));
    }

    #[tokio::test]
    async fn test_directory_saver_writes_file() {
        let dir = TempDir::new().unwrap();
        let saver = DirectorySaver::new(dir.path().join("out"));
        saver
            .save_bytes_as_file(b"PK\x03\x04", "Q1.xlsx", DEFAULT_REPORT_CONTENT_TYPE)
            .await
            .unwrap();
        let written = std::fs::read(dir.path().join("out").join("Q1.xlsx")).unwrap();
        assert_eq!(written, b"PK\x03\x04");
    }
}
