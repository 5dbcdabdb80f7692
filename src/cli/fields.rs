//
//  generic-api
//  cli/fields.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Shared arguments for query parameters and request bodies
//!
//! ```bash
//! # Filters go into the page request's `query` bag; falsy values are dropped
//! gapi search users -q status=active -q team= --page 1 --page-size 20
//!
//! # Top-level fields are always sent
//! gapi search users -F year=2024 -F archived=false
//!
//! # Bodies from inline JSON, a file, stdin, or key=value pairs
//! gapi create users --data '{"name": "Ann"}'
//! gapi create users --input user.json
//! gapi create users -s name=Ann -s address.city=Harare
//! ```

use std::fs;

use anyhow::{bail, Result};
use clap::Args;
use serde_json::{Map, Value};

use crate::api::PageRequest;

#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Filter added to the query bag (key=value); falsy values are not sent
    #[arg(long = "filter", short = 'q', action = clap::ArgAction::Append)]
    pub filter: Vec<String>,

    /// Top-level query field (key=value), sent as given
    #[arg(long = "field", short = 'F', action = clap::ArgAction::Append)]
    pub field: Vec<String>,

    /// Page number
    #[arg(long)]
    pub page: Option<u32>,

    /// Items per page
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Sort column
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Sort direction (asc or desc)
    #[arg(long)]
    pub sort_order: Option<String>,
}

impl QueryArgs {
    pub fn is_empty(&self) -> bool {
        self.filter.is_empty()
            && self.field.is_empty()
            && self.page.is_none()
            && self.page_size.is_none()
            && self.sort_by.is_none()
            && self.sort_order.is_none()
    }

    pub fn to_page_request(&self) -> Result<PageRequest> {
        let mut request = PageRequest {
            page_no: self.page,
            page_size: self.page_size,
            sort_by: self.sort_by.clone(),
            sort_order: self.sort_order.clone(),
            ..PageRequest::default()
        };

        for field in &self.field {
            let (key, value) = parse_field(field)?;
            request = request.field(key, value);
        }
        for filter in &self.filter {
            let (key, value) = parse_field(filter)?;
            request = request.filter(key, value);
        }

        Ok(request)
    }

    /// Returns the page request, or `None` when no option was given.
    pub fn to_optional_page_request(&self) -> Result<Option<PageRequest>> {
        if self.is_empty() {
            Ok(None)
        } else {
            self.to_page_request().map(Some)
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct BodyArgs {
    /// Request body as inline JSON
    #[arg(long, conflicts_with = "input")]
    pub data: Option<String>,

    /// Read the request body from a file (use "-" for stdin)
    #[arg(long, short = 'i')]
    pub input: Option<String>,

    /// Body field (key=value, dotted keys nest)
    #[arg(long = "set", short = 's', action = clap::ArgAction::Append)]
    pub set: Vec<String>,
}

impl BodyArgs {
    pub fn to_body(&self) -> Result<Value> {
        if let Some(input) = &self.input {
            let content = if input == "-" {
                let mut buffer = String::new();
                std::io::Read::read_to_string(&mut std::io::stdin(), &mut buffer)?;
                buffer
            } else {
                fs::read_to_string(input)?
            };
            return Ok(serde_json::from_str(&content)?);
        }

        if let Some(data) = &self.data {
            return Ok(serde_json::from_str(data)?);
        }

        if self.set.is_empty() {
            bail!("A request body is required: use --data, --input or --set");
        }

        let mut body = Map::new();
        for field in &self.set {
            let (key, value) = parse_field(field)?;
            set_nested_value(&mut body, &key, value);
        }
        Ok(Value::Object(body))
    }
}

/// Parses `key=value`, typing the value as JSON where it looks like JSON.
pub fn parse_field(field: &str) -> Result<(String, Value)> {
    let Some((key, value_str)) = field.split_once('=') else {
        bail!("Invalid field format: {}. Expected key=value", field);
    };
    if key.is_empty() {
        bail!("Invalid field format: {}. Key is empty", field);
    }

    let value = if value_str == "true" {
        Value::Bool(true)
    } else if value_str == "false" {
        Value::Bool(false)
    } else if value_str == "null" {
        Value::Null
    } else if let Ok(n) = value_str.parse::<i64>() {
        Value::Number(n.into())
    } else if let Ok(n) = value_str.parse::<f64>() {
        serde_json::Number::from_f64(n)
            .map(Value::Number)
            .unwrap_or(Value::String(value_str.to_string()))
    } else if value_str.starts_with('[') || value_str.starts_with('{') {
        serde_json::from_str(value_str).unwrap_or(Value::String(value_str.to_string()))
    } else {
        Value::String(value_str.to_string())
    };

    Ok((key.to_string(), value))
}

fn set_nested_value(obj: &mut Map<String, Value>, key: &str, value: Value) {
    match key.split_once('.') {
        None => {
            obj.insert(key.to_string(), value);
        }
        Some((first, rest)) => {
            let entry = obj
                .entry(first.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            if let Value::Object(nested) = entry {
                set_nested_value(nested, rest, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_field_types() {
        assert_eq!(parse_field("a=1").unwrap().1, json!(1));
        assert_eq!(parse_field("a=1.5").unwrap().1, json!(1.5));
        assert_eq!(parse_field("a=false").unwrap().1, json!(false));
        assert_eq!(parse_field("a=").unwrap().1, json!(""));
        assert_eq!(parse_field("a=[1,2]").unwrap().1, json!([1, 2]));
        assert_eq!(parse_field("a=x=y").unwrap(), ("a".to_string(), json!("x=y")));
        assert!(parse_field("novalue").is_err());
        assert!(parse_field("=v").is_err());
    }

    #[test]
    fn test_query_args_to_page_request() {
        let args = QueryArgs {
            filter: vec!["status=open".into(), "team=".into()],
            field: vec!["year=2024".into()],
            page: Some(2),
            ..QueryArgs::default()
        };
        let params = args.to_page_request().unwrap().to_query_params();
        assert_eq!(params.get("status"), Some("open"));
        assert_eq!(params.get("team"), None);
        assert_eq!(params.get("year"), Some("2024"));
        assert_eq!(params.get("pageNo"), Some("2"));
        assert!(QueryArgs::default().to_optional_page_request().unwrap().is_none());
    }

    #[test]
    fn test_body_from_set_fields() {
        let args = BodyArgs {
            set: vec!["name=Ann".into(), "address.city=Harare".into(), "age=30".into()],
            ..BodyArgs::default()
        };
        assert_eq!(
            args.to_body().unwrap(),
            json!({"name": "Ann", "address": {"city": "Harare"}, "age": 30})
        );
    }

    #[test]
    fn test_body_requires_input() {
        assert!(BodyArgs::default().to_body().is_err());
        let args = BodyArgs {
            data: Some(r#"{"id": 1}"#.into()),
            ..BodyArgs::default()
        };
        assert_eq!(args.to_body().unwrap(), json!({"id": 1}));
    }
}
