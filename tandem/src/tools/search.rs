//! Web search via the Tavily API.

use async_trait::async_trait;
use serde_json::json;

use crate::tools::{Tool, ToolError, ToolSpec};

const TAVILY_SEARCH_URL: &str = "https://api.tavily.com/search";

/// Default cap on returned results, matching the Tavily client default.
pub const DEFAULT_MAX_RESULTS: u64 = 5;

fn tavily_search_url() -> String {
    std::env::var("TAVILY_SEARCH_URL").unwrap_or_else(|_| TAVILY_SEARCH_URL.to_string())
}

/// Web search tool backed by Tavily.
///
/// Accepts a bare string query (the collapsed single-argument form) or an
/// object with a `query` field. Network and API failures are transport
/// errors so the registry can retry them.
pub struct TavilySearch {
    api_key: String,
    max_results: u64,
    client: reqwest::Client,
}

impl TavilySearch {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            max_results: DEFAULT_MAX_RESULTS,
            client: reqwest::Client::new(),
        }
    }

    /// Overrides the result cap (builder).
    pub fn with_max_results(mut self, max_results: u64) -> Self {
        self.max_results = max_results;
        self
    }

    fn extract_query(args: &serde_json::Value) -> Result<String, ToolError> {
        if let Some(q) = args.as_str() {
            return Ok(q.to_string());
        }
        args.get("query")
            .and_then(|v| v.as_str())
            .map(String::from)
            .ok_or_else(|| ToolError::InvalidInput("missing query".to_string()))
    }

    fn format_results(value: &serde_json::Value) -> String {
        let results: &[serde_json::Value] = value
            .get("results")
            .and_then(|r| r.as_array())
            .map(|v| v.as_slice())
            .unwrap_or(&[]);
        let mut s = String::new();
        for (i, r) in results.iter().enumerate() {
            let title = r.get("title").and_then(|t| t.as_str()).unwrap_or("(no title)");
            let url = r.get("url").and_then(|u| u.as_str()).unwrap_or("");
            s.push_str(&format!("[{}] {}\n  URL: {}\n", i + 1, title, url));
            if let Some(content) = r.get("content").and_then(|c| c.as_str()) {
                let content = content.trim();
                if !content.is_empty() {
                    s.push_str(&format!("  {}\n", content.replace('\n', " ")));
                }
            }
            s.push('\n');
        }
        if s.is_empty() {
            s = "No results.".to_string();
        }
        s
    }
}

#[async_trait]
impl Tool for TavilySearch {
    fn name(&self) -> &str {
        "tavily_search"
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "tavily_search".to_string(),
            description: Some(
                "Search the web for current information. Returns titles, URLs, and \
                 content snippets for the top results."
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string", "description": "Search query." }
                },
                "required": ["query"]
            }),
        }
    }

    async fn call(&self, args: serde_json::Value) -> Result<String, ToolError> {
        let query = Self::extract_query(&args)?;
        let body = json!({
            "api_key": self.api_key,
            "query": query,
            "max_results": self.max_results,
        });

        let res = self
            .client
            .post(tavily_search_url())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ToolError::Transport(e.to_string()))?;
        if !res.status().is_success() {
            let status = res.status();
            let err_body = res.text().await.unwrap_or_default();
            return Err(ToolError::Transport(format!(
                "Tavily API error {}: {}",
                status, err_body
            )));
        }
        let out: serde_json::Value = res
            .json()
            .await
            .map_err(|e| ToolError::Transport(e.to_string()))?;
        Ok(Self::format_results(&out))
    }
}
