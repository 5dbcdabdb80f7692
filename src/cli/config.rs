//
//  generic-api
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI configuration commands
//!
//! This module provides commands for reading and changing the backend base
//! URLs and the export directory.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;

use crate::config::CONFIG_KEYS;

use super::GlobalOptions;

/// Manage CLI configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get a configuration value
    Get(KeyArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Unset a configuration value
    Unset(KeyArgs),

    /// List all configuration values
    #[command(visible_alias = "ls")]
    List,

    /// Show configuration file path
    Path,
}

#[derive(Args, Debug)]
pub struct KeyArgs {
    /// Configuration key (apis.ems, apis.ams or export.dir)
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key (apis.ems, apis.ams or export.dir)
    pub key: String,

    /// Configuration value
    pub value: String,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Get(args) => {
                let config = global.load_config()?;
                match config.get(&args.key) {
                    Some(value) => println!("{}", value),
                    None if CONFIG_KEYS.contains(&args.key.as_str()) => {}
                    None => bail!(
                        "Unknown config key '{}'. Valid keys: {}",
                        args.key,
                        CONFIG_KEYS.join(", ")
                    ),
                }
                Ok(())
            }
            ConfigSubcommand::Set(args) => {
                let path = global.config_path()?;
                let mut config = global.load_config()?;
                config.set(&args.key, &args.value)?;
                config.save_to(&path)?;
                println!("{} Set {} = {}", style("✓").green(), args.key, args.value);
                Ok(())
            }
            ConfigSubcommand::Unset(args) => {
                let path = global.config_path()?;
                let mut config = global.load_config()?;
                if !config.unset(&args.key) {
                    bail!("Unknown config key '{}'", args.key);
                }
                config.save_to(&path)?;
                println!("{} Unset {}", style("✓").green(), args.key);
                Ok(())
            }
            ConfigSubcommand::List => {
                let config = global.load_config()?;
                for key in CONFIG_KEYS {
                    match config.get(key) {
                        Some(value) => println!("{} = {}", style(key).bold(), value),
                        None => println!("{} = {}", style(key).bold(), style("(not set)").dim()),
                    }
                }
                Ok(())
            }
            ConfigSubcommand::Path => {
                println!("{}", global.config_path()?.display());
                Ok(())
            }
        }
    }
}
