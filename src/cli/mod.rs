//
//  generic-api
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod config;
mod export;
mod fields;
mod resource;
mod session;

pub use config::ConfigCommand;
pub use export::ExportCommand;
pub use fields::{parse_field, BodyArgs, QueryArgs};
pub use resource::{
    CreateCommand, DeleteCommand, GetCommand, ListCommand, PostCommand, SearchCommand,
    UpdateCommand,
};
pub use session::SessionCommand;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::Value;
use thiserror::Error;

use crate::api::{DirectorySaver, GenericApi, Outcome};
use crate::config::{validate_base_url, Backend, Config, API_SUFFIX};
use crate::output::{OutputFormat, OutputWriter};
use crate::session::SessionContext;

#[derive(Parser, Debug)]
#[command(
    name = "gapi",
    version,
    about = "Work with envelope-style REST backends from the command line",
    long_about = "gapi drives the generic envelope client against the ems and ams backends.\n\n\
                  Every command issues one request and prints the unwrapped payload as JSON.",
    propagate_version = true,
    after_help = "Use 'gapi <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Backend deployment to talk to
    #[arg(long, short = 'b', global = true, env = "GAPI_BACKEND", value_enum, default_value_t = Backend::Ems)]
    pub backend: Backend,

    /// Base URL overriding the configured one (the `/api` suffix is added)
    #[arg(long, global = true, env = "GAPI_BASE_URL")]
    pub base_url: Option<String>,

    /// Configuration file to use instead of the default location
    #[arg(long, global = true, env = "GAPI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Primary access token (bypasses the keyring)
    #[arg(long, global = true, env = "GAPI_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// External token (bypasses the keyring)
    #[arg(long, global = true, env = "GAPI_EXTERNAL_TOKEN", hide_env_values = true)]
    pub external_token: Option<String>,

    /// Organization code (bypasses the keyring)
    #[arg(long, global = true, env = "GAPI_ORG_CODE")]
    pub org_code: Option<String>,

    /// Print single-line JSON
    #[arg(long, global = true)]
    pub compact: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch one item by id
    Get(GetCommand),

    /// Fetch a collection, an item or a sub-path without pagination
    List(ListCommand),

    /// Run a paginated search and print the whole envelope
    Search(SearchCommand),

    /// Create an item
    Create(CreateCommand),

    /// Update an item
    Update(UpdateCommand),

    /// Delete an item by id
    Delete(DeleteCommand),

    /// Post an arbitrary body to a collection
    Post(PostCommand),

    /// Download a report file
    Export(ExportCommand),

    /// Manage the stored session tokens
    Session(SessionCommand),

    /// Manage configuration
    Config(ConfigCommand),

    /// Show version information
    Version,
}

/// A command ended because the backend rejected the session.
#[derive(Debug, Error)]
#[error("Session expired. Store fresh tokens with 'gapi session set'")]
pub struct SessionEnded;

impl GlobalOptions {
    /// Path of the configuration file in use.
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Config::config_path(),
        }
    }

    pub fn load_config(&self) -> Result<Config> {
        Config::load_from(&self.config_path()?)
    }

    /// Session values given on the command line or in the environment.
    pub fn session_override(&self) -> Option<SessionContext> {
        if self.access_token.is_none() && self.external_token.is_none() && self.org_code.is_none()
        {
            return None;
        }
        Some(SessionContext {
            external_token: self.external_token.clone(),
            access_token: self.access_token.clone(),
            org_code: self.org_code.clone(),
        })
    }

    /// Builds a client for the collection `key`.
    pub fn client(&self, key: &str) -> Result<GenericApi<Value>> {
        let config = self.load_config()?;
        let client = match &self.base_url {
            Some(base_url) => {
                let root_url = format!("{}/{}", validate_base_url(base_url)?, API_SUFFIX);
                GenericApi::with_root_url(key, self.backend, root_url)?
                    .with_file_saver(DirectorySaver::new(config.export_dir()))
            }
            None => GenericApi::new(key, self.backend, &config)?,
        };

        tracing::debug!("Using {} for /{}", client.root_url(), client.key());

        Ok(match self.session_override() {
            Some(session) => client.with_session(session),
            None => client,
        })
    }

    pub fn writer(&self) -> OutputWriter {
        if self.compact {
            OutputWriter::new(OutputFormat::Compact)
        } else {
            OutputWriter::new(OutputFormat::Pretty)
        }
    }
}

/// Turns an operation outcome into a command result.
pub fn finish<T>(outcome: Outcome<T>) -> Result<T> {
    match outcome {
        Outcome::Ok(value) => Ok(value),
        Outcome::SessionExpired => Err(SessionEnded.into()),
        Outcome::Failed(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;

    #[test]
    fn test_parse_get_command() {
        let cli = Cli::try_parse_from(["gapi", "--backend", "ams", "get", "users", "7"]).unwrap();
        assert_eq!(cli.global.backend, Backend::Ams);
        match cli.command {
            Commands::Get(cmd) => {
                assert_eq!(cmd.key, "users");
                assert_eq!(cmd.id, "7");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_session_override() {
        let mut global = GlobalOptions::default();
        assert!(global.session_override().is_none());
        global.org_code = Some("ORG".to_string());
        let session = global.session_override().unwrap();
        assert_eq!(session.org_code(), Some("ORG"));
        assert_eq!(session.access_token(), None);
    }

    #[test]
    fn test_finish() {
        assert_eq!(finish(Outcome::Ok(1)).unwrap(), 1);
        let err = finish::<u8>(Outcome::SessionExpired).unwrap_err();
        assert!(err.downcast_ref::<SessionEnded>().is_some());
        let err = finish::<u8>(Outcome::Failed(ApiError::Application("bad".into()))).unwrap_err();
        assert_eq!(err.to_string(), "bad");
    }
}
