//
//  generic-api
//  api/headers.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Request header construction.
//!
//! Every request carries a JSON content type, the organization code and the
//! tokens of the current session, named after the backend's convention:
//!
//! | Backend | `x-access-token` | `external-token` |
//! |---------|------------------|------------------|
//! | `ams` | access token | external token |
//! | `ems` | external token | - |
//!
//! The `ems` mapping is asymmetric on purpose: that deployment validates the
//! externally issued token under its access-token header.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};

use crate::config::Backend;
use crate::session::SessionContext;

use super::common::ApiError;

/// Header carrying the token the backend authenticates with.
pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

/// Header carrying the externally issued token (`ams` only).
pub const EXTERNAL_TOKEN_HEADER: &str = "external-token";

/// Header carrying the organization code.
pub const ORG_CODE_HEADER: &str = "org-code";

/// Builds the header set for one request.
///
/// Absent or empty session values produce no header.
///
/// # Errors
///
/// Returns [`ApiError::InvalidHeader`] when a session value contains characters
/// that cannot appear in an HTTP header.
///
/// # Example
///
/// ```rust
/// use generic_api::api::headers::{build_headers, ACCESS_TOKEN_HEADER};
/// use generic_api::config::Backend;
/// use generic_api::session::SessionContext;
///
/// let session = SessionContext::new().with_external_token("ext");
/// let headers = build_headers(Backend::Ems, &session).unwrap();
/// assert_eq!(headers[ACCESS_TOKEN_HEADER], "ext");
/// ```
pub fn build_headers(backend: Backend, session: &SessionContext) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    match backend {
        Backend::Ams => {
            if let Some(token) = session.access_token() {
                insert(&mut headers, ACCESS_TOKEN_HEADER, token)?;
            }
            if let Some(token) = session.external_token() {
                insert(&mut headers, EXTERNAL_TOKEN_HEADER, token)?;
            }
        }
        Backend::Ems => {
            if let Some(token) = session.external_token() {
                insert(&mut headers, ACCESS_TOKEN_HEADER, token)?;
            }
        }
    }

    if let Some(org_code) = session.org_code() {
        insert(&mut headers, ORG_CODE_HEADER, org_code)?;
    }

    Ok(headers)
}

fn insert(headers: &mut HeaderMap, name: &'static str, value: &str) -> Result<(), ApiError> {
    let mut value =
        HeaderValue::from_str(value).map_err(|_| ApiError::InvalidHeader(name.to_string()))?;
    value.set_sensitive(name != ORG_CODE_HEADER);
    headers.insert(HeaderName::from_static(name), value);
    Ok(())
}
