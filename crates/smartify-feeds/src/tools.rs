//! AI-tools feed client. A plain JSON array endpoint.

use std::time::Duration;

use serde::Deserialize;
use smartify_core::config::FeedsConfig;
use tracing::debug;

use crate::error::{FeedError, Result};
use crate::types::ToolEntry;

#[derive(Clone)]
pub struct ToolsClient {
    http: reqwest::Client,
    base_url: String,
}

impl ToolsClient {
    pub fn new(config: &FeedsConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            base_url: config.tools_base_url.clone(),
        })
    }

    /// Fetch the current tool entries, in feed order.
    ///
    /// An unconfigured feed is not an error — the AI-tools section is simply
    /// empty, matching how an empty API response is handled.
    pub async fn list(&self) -> Result<Vec<ToolEntry>> {
        if self.base_url.is_empty() {
            debug!("tools feed not configured; returning no entries");
            return Ok(Vec::new());
        }

        let response = self.http.get(&self.base_url).send().await?;
        if !response.status().is_success() {
            return Err(FeedError::Status {
                status: response.status().as_u16(),
            });
        }

        let entries: Vec<ApiTool> = response.json().await?;
        Ok(entries.into_iter().map(ToolEntry::from).collect())
    }
}

#[derive(Debug, Deserialize)]
struct ApiTool {
    name: String,
    #[serde(default, alias = "description")]
    blurb: String,
    #[serde(default)]
    url: String,
}

impl From<ApiTool> for ToolEntry {
    fn from(tool: ApiTool) -> Self {
        ToolEntry {
            name: tool.name,
            blurb: tool.blurb,
            url: tool.url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_tool_accepts_description_alias() {
        let tool: ApiTool =
            serde_json::from_str(r#"{"name": "Claude", "description": "assistant"}"#).unwrap();
        assert_eq!(tool.blurb, "assistant");
    }

    #[test]
    fn api_tool_minimal_entry() {
        let tool: ApiTool = serde_json::from_str(r#"{"name": "X"}"#).unwrap();
        assert!(tool.blurb.is_empty());
        assert!(tool.url.is_empty());
    }
}
