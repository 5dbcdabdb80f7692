//
//  generic-api
//  cli/session.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Session commands
//!
//! Tokens live in the system keyring under the `generic-api` service, one
//! entry per session key. Every client built without token overrides reads
//! them on each request.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use serde_json::json;

use crate::session::{
    KeyringStore, SessionContext, ACCESS_TOKEN_KEY, EXTERNAL_TOKEN_KEY, ORG_CODE_KEY,
};

use super::GlobalOptions;

/// Manage stored session tokens
#[derive(Args, Debug)]
pub struct SessionCommand {
    #[command(subcommand)]
    pub command: SessionSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum SessionSubcommand {
    /// Show the stored session (tokens masked)
    Show,

    /// Store session values
    Set(SetArgs),

    /// Remove every stored session value
    Clear,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Primary access token
    #[arg(long)]
    pub access_token: Option<String>,

    /// External token
    #[arg(long)]
    pub external_token: Option<String>,

    /// Organization code
    #[arg(long)]
    pub org_code: Option<String>,
}

impl SessionCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let store = KeyringStore::new();
        match &self.command {
            SessionSubcommand::Show => show(&store, global),
            SessionSubcommand::Set(args) => set(&store, args, global),
            SessionSubcommand::Clear => {
                store.clear()?;
                global.writer().write_success("Session cleared");
                Ok(())
            }
        }
    }
}

fn show(store: &KeyringStore, global: &GlobalOptions) -> Result<()> {
    let session = SessionContext {
        external_token: store.get(EXTERNAL_TOKEN_KEY)?,
        access_token: store.get(ACCESS_TOKEN_KEY)?,
        org_code: store.get(ORG_CODE_KEY)?,
    };

    let writer = global.writer();
    if session.is_empty() {
        writer.write_warning("No session stored. Use 'gapi session set' to add tokens");
    }

    writer.write(&json!({
        EXTERNAL_TOKEN_KEY: session.external_token().map(mask_token),
        ACCESS_TOKEN_KEY: session.access_token().map(mask_token),
        ORG_CODE_KEY: session.org_code(),
    }))
}

fn set(store: &KeyringStore, args: &SetArgs, global: &GlobalOptions) -> Result<()> {
    let values = [
        (EXTERNAL_TOKEN_KEY, &args.external_token),
        (ACCESS_TOKEN_KEY, &args.access_token),
        (ORG_CODE_KEY, &args.org_code),
    ];
    if values.iter().all(|(_, value)| value.is_none()) {
        bail!("Nothing to store: pass --access-token, --external-token or --org-code");
    }

    for (key, value) in values {
        if let Some(value) = value {
            store.store(key, value)?;
            tracing::debug!("Stored {}", key);
        }
    }

    global.writer().write_success("Session updated");
    Ok(())
}

/// Keeps the last four characters of a token visible.
fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("abcdefgh"), "****efgh");
        assert_eq!(mask_token("abc"), "***");
        assert_eq!(mask_token(""), "");
    }
}
