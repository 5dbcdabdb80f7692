//
//  generic-api
//  cli/resource.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Collection commands
//!
//! Each command maps onto one [`GenericApi`](crate::api::GenericApi) operation
//! against the collection named by `key`.
//!
//! | Command  | Operation     | Request                              |
//! |----------|---------------|--------------------------------------|
//! | `get`    | `get`         | `GET {root}/{key}/{id}`              |
//! | `list`   | `simple_get`  | `GET {root}/{key}[/{id}][/{path}]`   |
//! | `search` | `search`      | `GET {root}/{key}?{query}`           |
//! | `create` | `create`      | `POST {root}/{key}[/{path}]`         |
//! | `update` | `update`      | `PUT {root}/{key}/{path or id}`      |
//! | `delete` | `remove`      | `DELETE {root}/{key}/{id}`           |
//! | `post`   | `simple_post` | `POST {root}/{key}`                  |

use anyhow::Result;
use clap::Args;
use serde_json::Value;

use crate::api::GetParams;

use super::{finish, BodyArgs, GlobalOptions, QueryArgs};

#[derive(Args, Debug)]
pub struct GetCommand {
    /// Collection key (e.g. users)
    pub key: String,

    /// Item id
    pub id: String,
}

impl GetCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client(&self.key)?;
        let item = finish(client.get(&self.id).await)?;
        global.writer().write(&item)
    }
}

#[derive(Args, Debug)]
pub struct ListCommand {
    /// Collection key
    pub key: String,

    /// Item id appended to the collection URL
    #[arg(long)]
    pub id: Option<String>,

    /// Sub-path appended after the id
    #[arg(long)]
    pub path: Option<String>,

    #[command(flatten)]
    pub query: QueryArgs,
}

impl ListCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client(&self.key)?;

        let mut params = GetParams::new();
        if let Some(id) = &self.id {
            params = params.id(id);
        }
        if let Some(path) = &self.path {
            params = params.path(path);
        }
        if let Some(page_request) = self.query.to_optional_page_request()? {
            params = params.page_request(page_request);
        }

        let payload = finish(client.simple_get(Some(&params)).await)?;
        global.writer().write(&payload)
    }
}

#[derive(Args, Debug)]
pub struct SearchCommand {
    /// Collection key
    pub key: String,

    #[command(flatten)]
    pub query: QueryArgs,
}

impl SearchCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client(&self.key)?;
        let page_request = self.query.to_page_request()?;
        let envelope = finish(client.search(&page_request).await)?;

        if envelope.has_next() {
            tracing::debug!(
                "More results after page {:?} of /{}",
                envelope.page_no,
                self.key
            );
        }
        global.writer().write(&envelope)
    }
}

#[derive(Args, Debug)]
pub struct CreateCommand {
    /// Collection key
    pub key: String,

    /// Sub-path to post to instead of the collection
    #[arg(long)]
    pub path: Option<String>,

    #[command(flatten)]
    pub body: BodyArgs,
}

impl CreateCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client(&self.key)?;
        let body = self.body.to_body()?;
        let created = finish(client.create(&body, self.path.as_deref()).await)?;
        global.writer().write(&created)
    }
}

#[derive(Args, Debug)]
pub struct UpdateCommand {
    /// Collection key
    pub key: String,

    /// Item id
    pub id: String,

    /// Sub-path used instead of the id
    #[arg(long)]
    pub path: Option<String>,

    #[command(flatten)]
    pub query: QueryArgs,

    #[command(flatten)]
    pub body: BodyArgs,
}

impl UpdateCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client(&self.key)?;
        let body = self.body.to_body()?;
        let page_request = self.query.to_optional_page_request()?;

        let updated = finish(
            client
                .update(&self.id, &body, page_request.as_ref(), self.path.as_deref())
                .await,
        )?;
        global.writer().write(&updated)
    }
}

#[derive(Args, Debug)]
pub struct DeleteCommand {
    /// Collection key
    pub key: String,

    /// Item id
    pub id: String,
}

impl DeleteCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client(&self.key)?;
        finish(client.remove(&self.id).await)?;
        global
            .writer()
            .write_success(&format!("Deleted {}/{}", self.key, self.id));
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct PostCommand {
    /// Collection key
    pub key: String,

    #[command(flatten)]
    pub body: BodyArgs,
}

impl PostCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client(&self.key)?;
        let body = self.body.to_body()?;
        let data: Value = finish(client.simple_post(&body).await)?;
        global.writer().write(&data)
    }
}
