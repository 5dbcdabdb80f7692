//
//  generic-api
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Page Requests and Query Serialization
//!
//! This module provides the structured query types sent as GET parameters and the
//! serializer that flattens them into a URL query string.
//!
//! # Overview
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`PageRequest`] | Flat paging/sorting fields plus an optional nested filter bag |
//! | [`GetParams`] | `{id, path, pageRequest}` bundle for flexible GET URLs |
//! | [`QueryParams`] | Ordered key/value set with replace-on-set semantics |
//!
//! # Serialization Rules
//!
//! - Top-level fields are written whenever they are present, falsy or not
//! - Entries of the `query` filter bag are written only when truthy, so an unset
//!   filter (`""`, `0`, `false`, `null`) never reaches the backend
//! - Filter entries are written first; a top-level field with the same key
//!   replaces the filter value in place
//!
//! # Example
//!
//! ```rust
//! use generic_api::api::common::PageRequest;
//!
//! let request = PageRequest::new()
//!     .page(1, 20)
//!     .filter("status", "open")
//!     .filter("assignee", "");
//!
//! let params = request.to_query_params();
//! assert_eq!(params.get("status"), Some("open"));
//! assert_eq!(params.get("assignee"), None);
//! assert_eq!(params.to_query_string(), "status=open&pageNo=1&pageSize=20");
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{is_truthy, render_value};

/// Name of the nested filter bag inside a page request.
pub const QUERY_BAG_KEY: &str = "query";

/// Structured query sent as GET parameters.
///
/// `PageRequest` carries the usual paging and sorting fields, any number of
/// additional flat fields, and an optional nested `query` bag of free-form
/// filters. It is built per call and never persisted.
///
/// # Fields
///
/// | Field | Wire name | Description |
/// |-------|-----------|-------------|
/// | `page_no` | `pageNo` | Requested page |
/// | `page_size` | `pageSize` | Items per page |
/// | `sort_by` | `sortBy` | Sort column |
/// | `sort_order` | `sortOrder` | Sort direction |
/// | `fields` | (flattened) | Any other flat field |
/// | `query` | `query` | Nested free-form filters |
///
/// # Example
///
/// ```rust
/// use generic_api::api::common::PageRequest;
///
/// let request = PageRequest::new()
///     .page(2, 50)
///     .sort("createdAt", "desc")
///     .field("year", 2024)
///     .filter("region", "north");
///
/// let params = request.to_query_params();
/// assert_eq!(params.get("pageNo"), Some("2"));
/// assert_eq!(params.get("year"), Some("2024"));
/// assert_eq!(params.get("region"), Some("north"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    /// Requested page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_no: Option<u32>,

    /// Items per page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,

    /// Sort column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,

    /// Sort direction, typically `asc` or `desc`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,

    /// Additional flat fields, serialized like the named ones.
    #[serde(flatten)]
    pub fields: Map<String, Value>,

    /// Nested free-form filters; only truthy values are serialized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<Map<String, Value>>,
}

impl PageRequest {
    /// Creates an empty page request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page number and page size.
    pub fn page(mut self, page_no: u32, page_size: u32) -> Self {
        self.page_no = Some(page_no);
        self.page_size = Some(page_size);
        self
    }

    /// Sets the sort column and direction.
    pub fn sort(mut self, sort_by: impl Into<String>, sort_order: impl Into<String>) -> Self {
        self.sort_by = Some(sort_by.into());
        self.sort_order = Some(sort_order.into());
        self
    }

    /// Adds a flat top-level field.
    ///
    /// A field named `query` is ignored by the serializer; use
    /// [`filter`](Self::filter) to populate the filter bag.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Adds an entry to the nested filter bag.
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Flattens the request into query parameters.
    ///
    /// Never fails, with or without a filter bag.
    pub fn to_query_params(&self) -> QueryParams {
        let mut params = QueryParams::new();

        if let Some(query) = &self.query {
            for (key, value) in query {
                if is_truthy(value) {
                    params.set(key, render_value(value));
                }
            }
        }

        let named = [
            ("pageNo", self.page_no.map(Value::from)),
            ("pageSize", self.page_size.map(Value::from)),
            ("sortBy", self.sort_by.clone().map(Value::from)),
            ("sortOrder", self.sort_order.clone().map(Value::from)),
        ];
        for (key, value) in named {
            if let Some(value) = value {
                params.set(key, render_value(&value));
            }
        }

        for (key, value) in &self.fields {
            if key == QUERY_BAG_KEY || value.is_null() {
                continue;
            }
            params.set(key, render_value(value));
        }

        params
    }
}

/// Parameters for building flexible GET URLs without a full search.
///
/// Produces `{base}/{key}[/{id}][/{path}]` with optional query parameters.
///
/// # Example
///
/// ```rust
/// use generic_api::api::common::{GetParams, PageRequest};
///
/// let params = GetParams::new()
///     .id(7)
///     .path("children")
///     .page_request(PageRequest::new().filter("active", true));
///
/// assert_eq!(params.id.as_deref(), Some("7"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetParams {
    /// Optional member id appended after the resource key.
    pub id: Option<String>,
    /// Optional sub-path appended after the id.
    pub path: Option<String>,
    /// Optional query parameters.
    pub page_request: Option<PageRequest>,
}

impl GetParams {
    /// Creates an empty parameter bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the member id.
    pub fn id(mut self, id: impl ToString) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Sets the sub-path.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the embedded page request.
    pub fn page_request(mut self, page_request: PageRequest) -> Self {
        self.page_request = Some(page_request);
        self
    }
}

/// Ordered query parameter set.
///
/// Behaves like `URLSearchParams.set`: setting an existing key replaces its
/// value and keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing any earlier value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(existing, _)| *existing == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Returns the value stored for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the pairs in insertion order.
    pub fn as_pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Encodes the parameters as `key=value&...` (form-urlencoded).
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}
