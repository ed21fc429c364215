//! Offline relay run with scripted agents and local tools.
//!
//! Shows the full workflow without any API keys: the Researcher "searches"
//! through a canned tool, hands its findings to the Chart Generator, which
//! runs the code tool and declares the FINAL ANSWER.
//!
//! Run: `cargo run -p tandem-examples --example relay_scripted`

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use tandem::tools::{PythonRepl, Tool, ToolError, ToolSpec};
use tandem::{Agent, LlmResponse, RelayRunner, ScriptedLlm, ToolRegistry};

struct CannedSearch;

#[async_trait]
impl Tool for CannedSearch {
    fn name(&self) -> &str {
        "tavily_search"
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "tavily_search".to_string(),
            description: Some("Canned search results.".to_string()),
            input_schema: json!({}),
        }
    }

    async fn call(&self, args: serde_json::Value) -> Result<String, ToolError> {
        Ok(format!(
            "UK GDP (trillion USD): 2019 2.85, 2020 2.70, 2021 3.14, 2022 3.09, 2023 3.34 \
             (query was {})",
            args
        ))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let researcher = Agent::researcher(Arc::new(ScriptedLlm::new(vec![
        LlmResponse::tool("tavily_search", r#"{"query":"UK GDP past 5 years"}"#),
        LlmResponse::text(
            "GDP in trillion USD: 2019 2.85, 2020 2.70, 2021 3.14, 2022 3.09, 2023 3.34. \
             Over to the chart generator.",
        ),
    ])));

    let chart_generator = Agent::chart_generator(Arc::new(ScriptedLlm::new(vec![
        LlmResponse::tool(
            "python_repl",
            r#"{"code":"print('chart: 2.85 2.70 3.14 3.09 3.34')"}"#,
        ),
        LlmResponse::text("FINAL ANSWER: chart of UK GDP 2019-2023 printed above."),
    ])));

    let mut registry = ToolRegistry::new();
    registry.register(Box::new(CannedSearch));
    registry.register(Box::new(PythonRepl::new()));

    let runner = RelayRunner::new(researcher, chart_generator, Arc::new(registry), 25)?;
    let state = runner
        .invoke("Fetch the UK's GDP over the past 5 years, then draw a line graph of it.")
        .await?;

    for message in &state.messages {
        let who = message.name.as_deref().unwrap_or("user");
        println!("[{who}] {}", message.content);
    }
    Ok(())
}
