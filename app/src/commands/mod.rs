//! Command handlers
//!
//! Every handler wraps its outcome in a [`CommandResult`] envelope so a
//! calling host sees the same shape for success and failure.

use assetbridge_core::{AssetSearchAdapter, ConfigField, Repository};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CommandResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for CommandResult<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => CommandResult::ok(data),
            Err(e) => {
                tracing::error!(error = %e, "Command failed");
                CommandResult::err(e.to_string())
            }
        }
    }
}

/// Rendered JSON plus whether the command succeeded
pub struct Output {
    pub json: String,
    pub success: bool,
}

fn render<T: Serialize>(result: CommandResult<T>) -> anyhow::Result<Output> {
    Ok(Output {
        json: serde_json::to_string_pretty(&result)?,
        success: result.success,
    })
}

#[derive(Debug, Serialize)]
struct ConfigSchema {
    option_names: Vec<&'static str>,
    fields: &'static [ConfigField],
}

pub fn fields() -> anyhow::Result<Output> {
    render(CommandResult::ok(ConfigSchema {
        option_names: AssetSearchAdapter::option_names(),
        fields: AssetSearchAdapter::config_fields(),
    }))
}

pub fn list(adapter: &AssetSearchAdapter) -> anyhow::Result<Output> {
    render(CommandResult::ok(adapter.list("", 0)))
}

pub async fn search(adapter: &AssetSearchAdapter, text: Option<&str>) -> anyhow::Result<Output> {
    render(CommandResult::from(adapter.search(text, 0).await))
}

pub async fn fetch(
    adapter: &AssetSearchAdapter,
    reference: &str,
    filename: &str,
) -> anyhow::Result<Output> {
    render(CommandResult::from(adapter.fetch(reference, filename).await))
}
