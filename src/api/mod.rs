//
//  generic-api
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the generic client for envelope-style REST backends.
//!
//! ## Architecture
//!
//! - [`client`]: [`GenericApi<T>`], URL assembly and the CRUD-style operations
//! - [`headers`]: Header Builder (session tokens per backend convention)
//! - [`export`]: Binary report export (filename and content type resolution, file saving)
//! - [`common`]: Error taxonomy, [`Outcome`], envelope and page request types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use generic_api::api::{GenericApi, Outcome, PageRequest};
//! use generic_api::config::Backend;
//! use generic_api::session::SessionContext;
//! use serde_json::Value;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let orders: GenericApi<Value> =
//!     GenericApi::with_root_url("orders", Backend::Ams, "https://ams.example.com/api")?
//!         .with_session(SessionContext::new().with_access_token("token"));
//!
//! let request = PageRequest::new().page(1, 20).filter("status", "open");
//! if let Outcome::Ok(page) = orders.search(&request).await {
//!     println!("{} of {:?}", page.items.unwrap_or_default().len(), page.total_count);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Failures are returned as [`ApiError`] variants inside [`Outcome::Failed`]:
//!
//! - `NoConnectivity`: the backend could not be reached
//! - `Application`: `isSuccess: false` on a 200 response
//! - `HttpStatus`: any other non-success status, carrying its reason phrase
//! - `Transport`: failures before a status existed
//!
//! A 401 is not an error: it resolves to [`Outcome::SessionExpired`].

/// The generic envelope client.
pub mod client;

/// Request header construction per backend convention.
pub mod headers;

/// Binary report export support.
pub mod export;

/// Types shared by every operation.
///
/// Includes:
/// - [`ApiError`]: Classified failure
/// - [`Outcome`]: Tagged operation result
/// - [`Envelope`]: Response wrapper
/// - [`PageRequest`] / [`GetParams`]: Query descriptions
pub mod common;

/// Re-export of the generic client.
pub use client::GenericApi;

/// Re-export of the common API types.
pub use common::{ApiError, Envelope, GetParams, Outcome, PageRequest, Payload};

/// Re-export of the export types.
pub use export::{DirectorySaver, ExportedReport, FileSaver};
