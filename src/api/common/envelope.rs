//
//  generic-api
//  api/common/envelope.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Response Envelope
//!
//! Every JSON response of the backend is wrapped in the same envelope:
//!
//! ```json
//! {"isSuccess": true, "data": {"id": 1}}
//! {"isSuccess": true, "items": [{"id": 1}], "totalCount": 40, "pageNo": 1, "pageSize": 20}
//! {"isSuccess": false, "message": "bad"}
//! ```
//!
//! [`Envelope::check`] takes exactly one interpretation path: the envelope is
//! handed back only when `isSuccess` is true, otherwise a single failure reason
//! is produced.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{classify_status, is_truthy, render_value, ApiError, GENERIC_FAILURE};

/// The uniform wrapper around every JSON response body.
///
/// # Type Parameters
///
/// - `T` - The model carried in `data` (single) or `items` (collection)
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `is_success` | `bool` | Whether the backend accepted the call |
/// | `data` | `Option<T>` | Single payload |
/// | `items` | `Option<Vec<T>>` | Collection payload |
/// | `message`, `error`, `code` | `Option<Value>` | Alternative failure descriptors |
/// | `total_count` | `Option<u64>` | Total matching items, for searches |
/// | `page_no`, `page_size` | `Option<u64>` | Page echoed back by the backend |
/// | `extra` | `Map` | Any other metadata the backend attaches |
///
/// # Example
///
/// ```rust
/// use generic_api::api::common::Envelope;
/// use reqwest::StatusCode;
///
/// let body = r#"{"isSuccess": true, "items": [1, 2], "totalCount": 12}"#;
/// let envelope: Envelope<u32> = Envelope::parse(body.as_bytes())
///     .and_then(|envelope| envelope.check(StatusCode::OK))
///     .and_then(|envelope| envelope.into_typed())
///     .unwrap();
///
/// assert_eq!(envelope.items, Some(vec![1, 2]));
/// assert_eq!(envelope.total_count, Some(12));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    /// Whether the backend accepted the call. A missing flag counts as failure.
    #[serde(default)]
    pub is_success: bool,

    /// Single payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Collection payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<T>>,

    /// Human readable failure description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Value>,

    /// Alternative failure description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,

    /// Machine readable failure code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<Value>,

    /// Total number of items matching a search.
    #[serde(default, alias = "total", skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,

    /// Page number echoed back by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_no: Option<u64>,

    /// Page size echoed back by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,

    /// Any other metadata.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload of a flexible GET: a single model or a collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload<T> {
    /// The envelope carried `data`.
    Item(T),
    /// The envelope carried `items` and no `data`.
    Items(Vec<T>),
}

impl<T> Payload<T> {
    /// Returns the models as a list; a single model becomes a one-element list.
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Item(item) => vec![item],
            Self::Items(items) => items,
        }
    }
}

impl Envelope<Value> {
    /// Parses a response body into an untyped envelope.
    ///
    /// Payloads stay raw JSON until [`check`](Envelope::check) has accepted the
    /// envelope, so a failure envelope is never rejected for its payload shape.
    /// A body that is not a JSON object is rejected with
    /// [`ApiError::InvalidEnvelope`].
    pub fn parse(body: &[u8]) -> Result<Self, ApiError> {
        serde_json::from_slice(body).map_err(|e| ApiError::InvalidEnvelope(e.to_string()))
    }

    /// Deserializes `data` and `items` into `T`, keeping the metadata.
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<Envelope<T>, ApiError> {
        let data = self.data.map(decode_payload).transpose()?;
        let items = self
            .items
            .map(|items| {
                items
                    .into_iter()
                    .map(decode_payload)
                    .collect::<Result<Vec<T>, _>>()
            })
            .transpose()?;

        Ok(Envelope {
            is_success: self.is_success,
            data,
            items,
            message: self.message,
            error: self.error,
            code: self.code,
            total_count: self.total_count,
            page_no: self.page_no,
            page_size: self.page_size,
            extra: self.extra,
        })
    }
}

fn decode_payload<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::InvalidEnvelope(e.to_string()))
}

impl<T> Envelope<T> {
    /// Decides success or failure for a response received with `status`.
    ///
    /// - `isSuccess: true` returns the envelope unchanged
    /// - `isSuccess: false` on a 200 fails with [`failure_reason`](Self::failure_reason)
    /// - `isSuccess: false` on any other status is classified from the status
    pub fn check(self, status: StatusCode) -> Result<Self, ApiError> {
        if self.is_success {
            Ok(self)
        } else if status == StatusCode::OK {
            Err(ApiError::Application(self.failure_reason()))
        } else {
            Err(classify_status(status.as_u16()))
        }
    }

    /// Returns the first truthy of `message`, `error` and `code`, else `"failed"`.
    pub fn failure_reason(&self) -> String {
        [&self.message, &self.error, &self.code]
            .into_iter()
            .flatten()
            .find(|value| is_truthy(value))
            .map(render_value)
            .unwrap_or_else(|| GENERIC_FAILURE.to_string())
    }

    /// Returns the single payload.
    ///
    /// A success envelope without `data` is rejected instead of yielding an
    /// absent value.
    pub fn into_data(self) -> Result<T, ApiError> {
        self.data
            .ok_or_else(|| ApiError::InvalidEnvelope("missing 'data' payload".to_string()))
    }

    /// Returns `data`, or `items` when `data` is absent.
    pub fn into_payload(self) -> Result<Payload<T>, ApiError> {
        match (self.data, self.items) {
            (Some(data), _) => Ok(Payload::Item(data)),
            (None, Some(items)) => Ok(Payload::Items(items)),
            (None, None) => Err(ApiError::InvalidEnvelope(
                "missing 'data' and 'items' payloads".to_string(),
            )),
        }
    }

    /// Checks whether more pages follow this one.
    ///
    /// Requires `totalCount`, `pageNo` (1-based) and `pageSize`; returns
    /// `false` when any of them is missing.
    pub fn has_next(&self) -> bool {
        match (self.total_count, self.page_no, self.page_size) {
            (Some(total), Some(page_no), Some(page_size)) => page_no
                .checked_mul(page_size)
                .is_some_and(|seen| seen < total),
            _ => false,
        }
    }
}
