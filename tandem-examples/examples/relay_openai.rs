//! Relay run against the real OpenAI and Tavily APIs.
//!
//! Requires `OPENAI_API_KEY` and `TAVILY_API_KEY` (a `.env` file works).
//! Optional: `TANDEM_MODEL`, `TANDEM_MAX_STEPS`, `TANDEM_SEARCH_RESULTS`,
//! `TANDEM_PYTHON`.
//!
//! Run: `cargo run -p tandem-examples --example relay_openai`

use std::sync::Arc;

use tandem::tools::{PythonRepl, TavilySearch, Tool};
use tandem::{Agent, ChatOpenAI, RelayRunner, ToolRegistry, WorkflowConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let config = WorkflowConfig::from_env();

    let search = config
        .tavily_api_key
        .as_ref()
        .map(|key| TavilySearch::new(key).with_max_results(config.search_results));
    if search.is_none() {
        eprintln!("TAVILY_API_KEY not set; the Researcher has no search tool");
    }
    let repl = PythonRepl::new().with_interpreter(&config.python_interpreter);

    // Each agent's client advertises only that agent's tools.
    let researcher_llm = Arc::new(
        ChatOpenAI::new(&config.model)
            .with_tools(search.iter().map(|t| t.spec()).collect()),
    );
    let chart_llm = Arc::new(ChatOpenAI::new(&config.model).with_tools(vec![repl.spec()]));

    let mut registry = ToolRegistry::new();
    if let Some(search) = search {
        registry.register(Box::new(search));
    }
    registry.register(Box::new(repl));

    let runner = RelayRunner::new(
        Agent::researcher(researcher_llm),
        Agent::chart_generator(chart_llm),
        Arc::new(registry),
        config.max_steps,
    )?;

    let state = runner
        .invoke("Fetch the UK's GDP over the past 5 years, then draw a line graph of it.")
        .await?;

    for message in &state.messages {
        let who = message.name.as_deref().unwrap_or("user");
        println!("[{who}] {}", message.content);
    }
    Ok(())
}
