//
//  generic-api
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common Types for the Envelope API
//!
//! This module contains the error taxonomy, the error classifier and the tagged
//! [`Outcome`] every client operation resolves to.
//!
//! # Overview
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`ApiError`] | Classified failure of a single call |
//! | [`Outcome`] | Payload, silent session expiry, or failure |
//! | [`Envelope`] | The wire wrapper around every JSON response |
//! | [`PageRequest`] | Structured query flattened into URL parameters |
//!
//! # Classification
//!
//! | Condition | Result |
//! |-----------|--------|
//! | No response reached (status 0, connect failure) | [`ApiError::NoConnectivity`] |
//! | Status 401 | [`Outcome::SessionExpired`] |
//! | Other non-success status | [`ApiError::HttpStatus`] carrying the reason phrase |
//! | `isSuccess: false` on a 200 | [`ApiError::Application`] |
//! | Failure before any status exists | [`ApiError::Transport`] |

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

mod envelope;
mod pagination;

pub use envelope::*;
pub use pagination::*;

/// Message reported when no transport response was reached.
pub const NO_CONNECTIVITY_MESSAGE: &str = "There is no internet connection";

/// Reason reported for an application failure that carries no description.
pub const GENERIC_FAILURE: &str = "failed";

/// Unified error type for all envelope API operations.
///
/// Every failure a call can produce funnels into one of these variants. The
/// display string of each variant is the message surfaced to the caller.
///
/// # Variants
///
/// | Variant | Description |
/// |---------|-------------|
/// | `NoConnectivity` | The backend could not be reached at all |
/// | `SessionExpired` | The backend answered 401 |
/// | `Application` | The backend answered 200 with `isSuccess: false` |
/// | `HttpStatus` | The backend answered with a non-success status |
/// | `Transport` | The request failed before a status existed |
/// | `InvalidEnvelope` | The body did not match the envelope schema |
/// | `InvalidHeader` | A session value cannot travel in an HTTP header |
/// | `Save` | The downloaded report could not be saved |
///
/// # Example
///
/// ```rust
/// use generic_api::api::common::{classify_status, ApiError};
///
/// let err = classify_status(500);
/// assert_eq!(err.to_string(), "Internal Server Error");
/// assert!(matches!(classify_status(0), ApiError::NoConnectivity));
/// ```
///
/// # Notes
///
/// - `SessionExpired` never reaches callers as an error; the client converts it
///   into [`Outcome::SessionExpired`]
/// - `reqwest::Error` converts through [`classify_transport`]
#[derive(Error, Debug)]
pub enum ApiError {
    /// No transport response was reached.
    #[error("There is no internet connection")]
    NoConnectivity,

    /// The backend rejected the session (HTTP 401).
    #[error("Session expired")]
    SessionExpired,

    /// The backend reported `isSuccess: false` on a 200 response.
    ///
    /// # Parameters
    ///
    /// - `0` - The first non-empty of `message`, `error`, `code`, or `"failed"`
    #[error("{0}")]
    Application(String),

    /// The backend answered with a non-success HTTP status.
    #[error("{reason}")]
    HttpStatus {
        /// The numeric HTTP status
        status: u16,
        /// The textual reason phrase of the status
        reason: String,
    },

    /// The request failed before any status was available.
    #[error("{0}")]
    Transport(String),

    /// The response body could not be read as the envelope the operation expects.
    #[error("Invalid response envelope: {0}")]
    InvalidEnvelope(String),

    /// A session value contains characters HTTP headers cannot carry.
    ///
    /// # Parameters
    ///
    /// - `0` - The name of the header that could not be built
    #[error("Invalid value for header '{0}'")]
    InvalidHeader(String),

    /// The file-save capability failed to persist an exported report.
    #[error("Failed to save report: {0}")]
    Save(String),
}

impl ApiError {
    /// Returns the HTTP status that produced this error, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::SessionExpired => Some(StatusCode::UNAUTHORIZED.as_u16()),
            Self::NoConnectivity => Some(0),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        classify_transport(&err)
    }
}

/// Maps a transport status code to an error.
///
/// Status 0 stands for "no response reached". Status 401 maps to
/// [`ApiError::SessionExpired`]. Any other status becomes
/// [`ApiError::HttpStatus`] with its canonical reason phrase, or the bare
/// number for statuses without one.
///
/// # Example
///
/// ```rust
/// use generic_api::api::common::{classify_status, ApiError};
///
/// assert!(matches!(classify_status(401), ApiError::SessionExpired));
/// assert_eq!(classify_status(404).to_string(), "Not Found");
/// ```
pub fn classify_status(status: u16) -> ApiError {
    match status {
        0 => ApiError::NoConnectivity,
        401 => ApiError::SessionExpired,
        _ => {
            let reason = StatusCode::from_u16(status)
                .ok()
                .and_then(|code| code.canonical_reason())
                .map(str::to_string)
                .unwrap_or_else(|| status.to_string());
            ApiError::HttpStatus { status, reason }
        }
    }
}

/// Maps a `reqwest` failure to an error.
///
/// Connection-level failures (refused, DNS, unreachable) never produced a
/// status and classify as [`ApiError::NoConnectivity`]. Failures carrying a
/// status go through [`classify_status`]. Everything else keeps the
/// underlying message.
pub fn classify_transport(err: &reqwest::Error) -> ApiError {
    if err.is_connect() {
        return ApiError::NoConnectivity;
    }
    if let Some(status) = err.status() {
        return classify_status(status.as_u16());
    }
    ApiError::Transport(err.to_string())
}

/// The result of a single client operation.
///
/// A backend answering 401 is not an error from the caller's point of view: the
/// session is already gone and the host application has been told so through
/// the client's [`UnloadGuard`](crate::session::UnloadGuard). Callers pattern
/// match instead of checking for an absent value.
///
/// # Example
///
/// ```rust
/// use generic_api::api::{ApiError, Outcome};
///
/// let outcome: Outcome<u32> = Outcome::from(Err::<u32, _>(ApiError::SessionExpired));
/// assert!(outcome.is_session_expired());
///
/// let outcome: Outcome<u32> = Outcome::from(Ok::<u32, ApiError>(7));
/// assert_eq!(outcome.into_result().unwrap(), Some(7));
/// ```
#[derive(Debug)]
#[must_use]
pub enum Outcome<T> {
    /// The operation succeeded with its payload.
    Ok(T),
    /// The backend rejected the session; nothing to surface to the user.
    SessionExpired,
    /// The operation failed with a classified error.
    Failed(ApiError),
}

impl<T> Outcome<T> {
    /// Returns `true` when the operation produced its payload.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Returns `true` when the session expired during the operation.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }

    /// Returns `true` when the operation failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Returns the payload, discarding expiry and failure.
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Ok(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the failure, if any.
    pub fn err(self) -> Option<ApiError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Maps the payload while keeping expiry and failure untouched.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Self::Ok(value) => Outcome::Ok(f(value)),
            Self::SessionExpired => Outcome::SessionExpired,
            Self::Failed(err) => Outcome::Failed(err),
        }
    }

    /// Converts into a `Result` for use with `?`.
    ///
    /// A session expiry resolves to `Ok(None)`, mirroring the "resolve with no
    /// value" contract of the backend client.
    pub fn into_result(self) -> Result<Option<T>, ApiError> {
        match self {
            Self::Ok(value) => Ok(Some(value)),
            Self::SessionExpired => Ok(None),
            Self::Failed(err) => Err(err),
        }
    }
}

impl<T> From<Result<T, ApiError>> for Outcome<T> {
    fn from(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(ApiError::SessionExpired) => Self::SessionExpired,
            Err(err) => Self::Failed(err),
        }
    }
}

/// JavaScript-style truthiness of a JSON value.
///
/// `null`, `false`, `0`, `NaN` and `""` are falsy; everything else, including
/// empty arrays and objects, is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Renders a JSON value as a query parameter or message string.
///
/// Strings are taken verbatim, arrays are comma-joined (with `null` elements
/// rendered empty) and objects fall back to compact JSON.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => render_value(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_status_zero_is_no_connectivity() {
        let err = classify_status(0);
        assert!(matches!(err, ApiError::NoConnectivity));
        assert_eq!(err.to_string(), NO_CONNECTIVITY_MESSAGE);
    }

    #[test]
    fn test_classify_status_401_is_session_expired() {
        assert!(matches!(classify_status(401), ApiError::SessionExpired));
    }

    #[test]
    fn test_classify_status_uses_reason_phrase() {
        assert_eq!(classify_status(500).to_string(), "Internal Server Error");
        assert_eq!(classify_status(403).to_string(), "Forbidden");
        assert_eq!(classify_status(599).to_string(), "599");
        assert_eq!(classify_status(502).status(), Some(502));
    }

    #[test]
    fn test_outcome_from_result() {
        assert!(Outcome::from(Ok::<_, ApiError>(1)).is_ok());
        assert!(Outcome::<u8>::from(Err(ApiError::SessionExpired)).is_session_expired());
        let failed = Outcome::<u8>::from(Err(ApiError::Application("bad".into())));
        assert!(failed.is_failed());
        assert_eq!(failed.err().unwrap().to_string(), "bad");
    }

    #[test]
    fn test_outcome_into_result() {
        assert_eq!(Outcome::Ok(3).into_result().unwrap(), Some(3));
        assert_eq!(Outcome::<u8>::SessionExpired.into_result().unwrap(), None);
        assert!(Outcome::<u8>::Failed(ApiError::NoConnectivity).into_result().is_err());
        assert_eq!(Outcome::Ok(2).map(|v| v * 2).ok(), Some(4));
    }

    #[test]
    fn test_truthiness() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!is_truthy(&falsy), "{falsy} should be falsy");
        }
        for truthy in [json!(true), json!(1), json!(-2.5), json!("0"), json!([]), json!({})] {
            assert!(is_truthy(&truthy), "{truthy} should be truthy");
        }
    }

    #[test]
    fn test_render_value() {
        assert_eq!(render_value(&json!("open")), "open");
        assert_eq!(render_value(&json!(42)), "42");
        assert_eq!(render_value(&json!(true)), "true");
        assert_eq!(render_value(&json!([1, "a", null])), "1,a,");
        assert_eq!(render_value(&json!({"a": 1})), r#"{"a":1}"#);
    }
}
