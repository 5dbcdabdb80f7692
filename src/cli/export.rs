//
//  generic-api
//  cli/export.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Report export command
//!
//! ```bash
//! # GET {root}/reports/sales?from=2024-01-01, saved under the server's filename
//! gapi export reports --path reports/sales -F from=2024-01-01
//!
//! # Save as ./out/q1.xlsx
//! gapi export reports --name q1.xlsx --out ./out
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::api::DirectorySaver;

use super::{finish, GlobalOptions, QueryArgs};

#[derive(Args, Debug)]
pub struct ExportCommand {
    /// Collection key (the report URL when no --path is given)
    pub key: String,

    /// Report path relative to the API root
    #[arg(long)]
    pub path: Option<String>,

    /// File name overriding the one sent by the server
    #[arg(long)]
    pub name: Option<String>,

    /// Directory to save into (defaults to export.dir)
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,

    #[command(flatten)]
    pub query: QueryArgs,
}

impl ExportCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let mut client = global.client(&self.key)?;
        if let Some(out) = &self.out {
            client = client.with_file_saver(DirectorySaver::new(out));
        }

        let page_request = self.query.to_page_request()?;
        let report = finish(
            client
                .export_report(&page_request, self.path.as_deref(), self.name.as_deref())
                .await,
        )?;

        let writer = global.writer();
        writer.write_success(&format!(
            "Saved {} ({} bytes)",
            report.file_name, report.size
        ));
        writer.write(&report)
    }
}
