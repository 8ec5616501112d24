//! Web search via Google Custom Search.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use bot_core::CallerContext;

use crate::error::ToolError;
use crate::tool::{Tool, ToolOutput};

const SEARCH_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// Default number of results rendered.
const DEFAULT_RESULTS: usize = 5;

/// Hard cap the API accepts.
const MAX_RESULTS: usize = 10;

/// Fixed message when credentials are absent.
pub const NOT_CONFIGURED_MESSAGE: &str = "❌ Web search is not configured. \
    Set GOOGLE_SEARCH_API_KEY and GOOGLE_SEARCH_ENGINE_ID in the environment.";

/// Search credentials and limits.
#[derive(Debug, Clone, Default)]
pub struct SearchConfig {
    /// Google API key.
    pub api_key: Option<String>,
    /// Custom search engine id.
    pub engine_id: Option<String>,
    /// Results to render per query.
    pub max_results: usize,
}

impl SearchConfig {
    /// Read `GOOGLE_SEARCH_API_KEY` / `GOOGLE_SEARCH_ENGINE_ID`.
    ///
    /// Missing credentials are not an error; the tool degrades to a fixed
    /// "not configured" reply.
    pub fn from_env() -> Self {
        Self {
            api_key: env::var("GOOGLE_SEARCH_API_KEY").ok().filter(|v| !v.is_empty()),
            engine_id: env::var("GOOGLE_SEARCH_ENGINE_ID").ok().filter(|v| !v.is_empty()),
            max_results: DEFAULT_RESULTS,
        }
    }

    /// Whether both credentials are present.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.engine_id.is_some()
    }
}

/// One search result.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    snippet: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchArgs {
    query: String,
}

/// Web search, available to every caller.
pub struct SearchTool {
    client: reqwest::Client,
    config: SearchConfig,
}

impl SearchTool {
    /// Create a search tool with the given configuration.
    pub fn new(config: SearchConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");
        Self { client, config }
    }

    /// Create a search tool configured from the environment.
    pub fn from_env() -> Self {
        Self::new(SearchConfig::from_env())
    }

    /// Run one search query, returning up to `max` hits.
    ///
    /// Callers must check [`SearchConfig::is_configured`] first; this method
    /// assumes credentials are present.
    pub async fn search(&self, query: &str, max: usize) -> Result<Vec<SearchHit>, ToolError> {
        let api_key = self.config.api_key.as_deref().unwrap_or_default();
        let engine_id = self.config.engine_id.as_deref().unwrap_or_default();
        let num = max.clamp(1, MAX_RESULTS);
        let num_str = num.to_string();

        debug!("Searching for: {}", query);

        let response = self
            .client
            .get(SEARCH_ENDPOINT)
            .query(&[
                ("key", api_key),
                ("cx", engine_id),
                ("q", query),
                ("num", num_str.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ToolError::ExecutionFailed(format!(
                "search failed with status code: {}",
                response.status().as_u16()
            )));
        }

        let body: SearchResponse = response.json().await?;

        let hits = body
            .items
            .into_iter()
            .take(num)
            .map(|item| SearchHit {
                title: item.title.unwrap_or_else(|| "No title".to_string()),
                url: item.link.unwrap_or_default(),
                snippet: item.snippet.unwrap_or_else(|| "No description".to_string()),
            })
            .collect();

        Ok(hits)
    }

    fn format_results(query: &str, hits: &[SearchHit]) -> String {
        if hits.is_empty() {
            return format!("🔍 No results found for: **{}**", query);
        }

        let mut text = format!("🔍 **Search Results for:** {}\n\n", query);
        for (i, hit) in hits.iter().enumerate() {
            text.push_str(&format!("**{}. {}**\n", i + 1, hit.title));
            text.push_str(&format!("{}\n", hit.snippet));
            text.push_str(&format!("🔗 {}\n\n", hit.url));
        }
        text
    }
}

#[async_trait]
impl Tool for SearchTool {
    fn name(&self) -> &str {
        "search"
    }

    fn description(&self) -> &str {
        "Search the web using Google Custom Search. \
         Only use when the user explicitly asks to search for something."
    }

    fn parameters(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, _caller: &CallerContext, args: Value) -> Result<ToolOutput, ToolError> {
        let args: SearchArgs = serde_json::from_value(args)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        if !self.config.is_configured() {
            return Ok(ToolOutput::failure(NOT_CONFIGURED_MESSAGE));
        }

        let hits = self.search(&args.query, self.config.max_results).await?;
        Ok(ToolOutput::success(Self::format_results(&args.query, &hits)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::caller;

    fn unconfigured() -> SearchTool {
        SearchTool::new(SearchConfig {
            api_key: None,
            engine_id: None,
            max_results: DEFAULT_RESULTS,
        })
    }

    #[tokio::test]
    async fn test_unconfigured_returns_fixed_message() {
        let tool = unconfigured();
        let output = tool
            .execute(&caller(false), serde_json::json!({ "query": "rust" }))
            .await
            .unwrap();
        assert_eq!(output.content, NOT_CONFIGURED_MESSAGE);
        assert!(!output.success);
    }

    #[tokio::test]
    async fn test_partial_credentials_still_unconfigured() {
        let tool = SearchTool::new(SearchConfig {
            api_key: Some("key".to_string()),
            engine_id: None,
            max_results: DEFAULT_RESULTS,
        });
        let output = tool
            .execute(&caller(false), serde_json::json!({ "query": "rust" }))
            .await
            .unwrap();
        assert_eq!(output.content, NOT_CONFIGURED_MESSAGE);
    }

    #[tokio::test]
    async fn test_missing_query_is_invalid_arguments() {
        let tool = unconfigured();
        let result = tool.execute(&caller(false), serde_json::json!({})).await;
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }

    #[test]
    fn test_format_results() {
        let hits = vec![
            SearchHit {
                title: "Rust".to_string(),
                url: "https://rust-lang.org".to_string(),
                snippet: "A language".to_string(),
            },
            SearchHit {
                title: "Crates".to_string(),
                url: "https://crates.io".to_string(),
                snippet: "The registry".to_string(),
            },
        ];
        let text = SearchTool::format_results("rust", &hits);
        assert!(text.contains("**1. Rust**"));
        assert!(text.contains("**2. Crates**"));
        assert!(text.contains("https://crates.io"));
    }

    #[test]
    fn test_format_no_results() {
        let text = SearchTool::format_results("obscure", &[]);
        assert!(text.contains("No results found"));
    }

    #[test]
    fn test_not_visible_as_admin_only() {
        let tool = unconfigured();
        assert!(!tool.requires_admin());
    }
}
