//
//  generic-api
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Generic API Client Library
//!
//! A typed client for paginated JSON REST backends that wrap every response in a
//! uniform envelope (`{isSuccess, data | items, message, error, code}`).
//!
//! ## Overview
//!
//! One generic client, [`GenericApi<T>`](api::GenericApi), serves every REST
//! collection of two backend deployments (`ems` and `ams`). The deployments share
//! the wire contract but differ in base URL and in how authentication headers are
//! named.
//!
//! ## Features
//!
//! - **Envelope unwrapping**: payloads are returned only when the backend reports success
//! - **Uniform error classification**: connectivity, HTTP status, application failures
//! - **Silent session expiry**: a 401 resolves as [`Outcome::SessionExpired`] instead of an error
//! - **Query serialization**: page requests with a nested filter bag flatten to query strings
//! - **Report export**: binary downloads with content-disposition filename resolution
//!
//! ## Module Structure
//!
//! - [`api`]: The generic client, envelope, errors and export path
//! - [`session`]: Session context injection and keyring-backed token storage
//! - [`config`]: Backend identities and base URL configuration
//! - [`cli`]: Command-line interface definitions using clap
//! - [`output`]: Output formatting for the command-line front end
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use generic_api::api::GenericApi;
//! use generic_api::config::{Backend, Config};
//! use generic_api::session::SessionContext;
//! use generic_api::Outcome;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::load()?;
//! let users: GenericApi<serde_json::Value> = GenericApi::new("users", Backend::Ams, &config)?
//!     .with_session(SessionContext::new().with_access_token("token"));
//!
//! match users.get(42).await {
//!     Outcome::Ok(user) => println!("{}", user),
//!     Outcome::SessionExpired => println!("please log in again"),
//!     Outcome::Failed(e) => eprintln!("{}", e),
//! }
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions.
///
/// Contains the `gapi` commands, arguments, and subcommands defined using the clap derive API.
pub mod cli;

/// The generic envelope client.
///
/// Request construction, envelope unwrapping, error classification and the
/// binary export path all live here.
pub mod api;

/// Session context and token storage.
///
/// The client reads tokens through the [`session::SessionSource`] trait on every
/// request; tokens are written by a login flow outside the client.
pub mod session;

/// Configuration file management.
///
/// Maps backend identities to base URLs, stored in platform-specific locations:
/// - Linux: `~/.config/gapi/config.toml`
/// - macOS: `~/Library/Application Support/gapi/config.toml`
/// - Windows: `%APPDATA%\gapi\config.toml`
pub mod config;

/// Output formatting for the command-line front end.
pub mod output;

/// Re-export of the main CLI struct for convenient access.
pub use cli::Cli;

/// Re-export of the configuration struct.
pub use config::Config;

/// Re-export of the tagged operation outcome.
///
/// Every client operation resolves to an [`Outcome`]: a payload, a silent
/// session expiry, or a classified failure.
pub use api::Outcome;

/// Application name constant.
///
/// The name of the CLI binary, used for display purposes and configuration paths.
pub const APP_NAME: &str = "gapi";

/// Application version constant.
///
/// Derived from Cargo.toml at compile time.
///
/// ```rust
/// use generic_api::VERSION;
///
/// println!("gapi version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// Standardized exit codes following Unix conventions, allowing scripts
/// to programmatically detect the outcome of CLI operations.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error.
    ///
    /// The request failed or the backend reported an application failure.
    /// Check stderr for details.
    pub const ERROR: i32 = 1;

    /// The backend session has expired.
    ///
    /// The backend answered 401. Store fresh tokens with `gapi session set`.
    pub const AUTH_ERROR: i32 = 4;
}
