//
//  generic-api
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Output helpers for the `gapi` front end. Results go to stdout as JSON,
//! status messages go to stderr so piping stays clean.
//!
//! ## Example
//!
//! ```rust,ignore
//! use generic_api::output::{OutputFormat, OutputWriter};
//!
//! let writer = OutputWriter::new(OutputFormat::Compact);
//! writer.write(&serde_json::json!({"id": 1}))?;
//! writer.write_success("Deleted users/1");
//! ```

mod json;

pub use json::*;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OutputFormat {
    /// Indented JSON
    #[default]
    Pretty,
    /// Single-line JSON
    Compact,
}

pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled_stderr(),
        }
    }

    pub fn write<T: Serialize + ?Sized>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Pretty => write_json(value),
            OutputFormat::Compact => write_json_compact(value),
        }
    }

    pub fn write_warning(&self, msg: &str) {
        use console::style;
        if self.color {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        } else {
            eprintln!("warning: {}", msg);
        }
    }

    pub fn write_success(&self, msg: &str) {
        use console::style;
        if self.color {
            eprintln!("{} {}", style("✓").green().bold(), msg);
        } else {
            eprintln!("✓ {}", msg);
        }
    }
}
