//! Send an arbitrary request through the authenticated pipeline.

use clap::Args;
use reqwest::Method;
use serde_json::{Value, json};
use tracing::debug;

use crate::output::{self, OutputFormat};
use mentorhub_client::ApiRequest;
use mentorhub_core::error::AppError;
use mentorhub_core::result::AppResult;

use super::Context;

/// Arguments for the request command
#[derive(Debug, Args)]
pub struct RequestArgs {
    /// HTTP method (GET, POST, PUT, PATCH, DELETE)
    pub method: String,

    /// Path relative to the API base URL
    pub path: String,

    /// JSON request body
    #[arg(short, long)]
    pub data: Option<String>,

    /// Query parameter as key=value (repeatable)
    #[arg(short, long = "query", value_parser = parse_query_pair)]
    pub query: Vec<(String, String)>,
}

/// Execute the request command
pub async fn execute(args: &RequestArgs, ctx: &Context, format: OutputFormat) -> AppResult<()> {
    let request = build_request(args)?;
    debug!(method = %request.method, path = %request.path, "Sending request");

    let result = ctx.client.send(request).await;

    if let Some(target) = ctx.redirected_to() {
        output::print_warning(&format!("Session ended; redirected to {target}"));
    }

    let response = result?;
    let status = response.status();
    let text = response.text().await?;
    let body = serde_json::from_str::<Value>(&text).ok();

    match format {
        OutputFormat::Json => {
            let body = body.unwrap_or(Value::String(text));
            output::print_item(&json!({ "status": status.as_u16(), "body": body }), format);
        }
        OutputFormat::Table => {
            output::print_kv("Status", &status.to_string());
            match body {
                Some(body) => println!(
                    "{}",
                    serde_json::to_string_pretty(&body).unwrap_or(text)
                ),
                None if !text.is_empty() => println!("{text}"),
                None => {}
            }
        }
    }

    Ok(())
}

fn build_request(args: &RequestArgs) -> AppResult<ApiRequest> {
    let method = Method::from_bytes(args.method.to_ascii_uppercase().as_bytes())
        .map_err(|_| AppError::validation(format!("Invalid HTTP method '{}'", args.method)))?;

    let mut request = ApiRequest::new(method, args.path.clone());
    if let Some(data) = &args.data {
        let body: Value = serde_json::from_str(data)?;
        request = request.json(&body)?;
    }
    for (key, value) in &args.query {
        request = request.query(key.as_str(), value.as_str());
    }
    Ok(request)
}

fn parse_query_pair(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))
}
