//! Workflow configuration from the environment.
//!
//! All knobs are plain env vars so a `.env` file in the working directory is
//! enough to run the relay. Existing environment always wins over `.env`.

use crate::graph::DEFAULT_MAX_STEPS;
use crate::tools::DEFAULT_MAX_RESULTS;

/// Env var naming the chat model. Defaults to `gpt-4-1106-preview`.
pub const MODEL_VAR: &str = "TANDEM_MODEL";

/// Env var holding the Tavily API key. Required for the search tool.
pub const TAVILY_API_KEY_VAR: &str = "TAVILY_API_KEY";

/// Env var capping search results per query.
pub const SEARCH_RESULTS_VAR: &str = "TANDEM_SEARCH_RESULTS";

/// Env var capping run-loop steps.
pub const MAX_STEPS_VAR: &str = "TANDEM_MAX_STEPS";

/// Env var naming the interpreter for the code tool.
pub const PYTHON_VAR: &str = "TANDEM_PYTHON";

/// Settings for one relay run, resolved from the environment.
#[derive(Clone, Debug)]
pub struct WorkflowConfig {
    /// Chat model passed to the OpenAI client.
    pub model: String,
    /// Tavily API key; None disables the search tool.
    pub tavily_api_key: Option<String>,
    /// Search results per query.
    pub search_results: u64,
    /// Run-loop step cap.
    pub max_steps: usize,
    /// Interpreter binary for the code tool.
    pub python_interpreter: String,
}

impl WorkflowConfig {
    /// Loads `.env` if present, then resolves every field from env vars,
    /// falling back to defaults. Unparsable numeric values fall back too.
    pub fn from_env() -> Self {
        let _ = dotenv::dotenv();

        let model =
            std::env::var(MODEL_VAR).unwrap_or_else(|_| "gpt-4-1106-preview".to_string());
        let tavily_api_key = std::env::var(TAVILY_API_KEY_VAR).ok();
        let search_results = std::env::var(SEARCH_RESULTS_VAR)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_RESULTS);
        let max_steps = std::env::var(MAX_STEPS_VAR)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_STEPS);
        let python_interpreter =
            std::env::var(PYTHON_VAR).unwrap_or_else(|_| "python3".to_string());

        if tavily_api_key.is_none() {
            tracing::warn!("TAVILY_API_KEY not set, web search will be unavailable");
        }

        Self {
            model,
            tavily_api_key,
            search_results,
            max_steps,
            python_interpreter,
        }
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4-1106-preview".to_string(),
            tavily_api_key: None,
            search_results: DEFAULT_MAX_RESULTS,
            max_steps: DEFAULT_MAX_STEPS,
            python_interpreter: "python3".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn restore_var(key: &str, prev: Option<String>) {
        match prev {
            Some(v) => env::set_var(key, v),
            None => env::remove_var(key),
        }
    }

    /// **Scenario**: With no relevant vars set, every field takes its default.
    #[test]
    fn from_env_defaults() {
        let prev_model = env::var(MODEL_VAR).ok();
        let prev_steps = env::var(MAX_STEPS_VAR).ok();
        env::remove_var(MODEL_VAR);
        env::remove_var(MAX_STEPS_VAR);

        let config = WorkflowConfig::from_env();

        restore_var(MODEL_VAR, prev_model);
        restore_var(MAX_STEPS_VAR, prev_steps);

        assert_eq!(config.model, "gpt-4-1106-preview");
        assert_eq!(config.max_steps, DEFAULT_MAX_STEPS);
        assert_eq!(config.search_results, DEFAULT_MAX_RESULTS);
        assert_eq!(config.python_interpreter, "python3");
    }

    /// **Scenario**: Set vars override defaults; an unparsable number falls
    /// back instead of failing.
    #[test]
    fn from_env_reads_overrides() {
        let prev_model = env::var(MODEL_VAR).ok();
        let prev_steps = env::var(MAX_STEPS_VAR).ok();
        let prev_results = env::var(SEARCH_RESULTS_VAR).ok();
        env::set_var(MODEL_VAR, "gpt-4o-mini");
        env::set_var(MAX_STEPS_VAR, "10");
        env::set_var(SEARCH_RESULTS_VAR, "not-a-number");

        let config = WorkflowConfig::from_env();

        restore_var(MODEL_VAR, prev_model);
        restore_var(MAX_STEPS_VAR, prev_steps);
        restore_var(SEARCH_RESULTS_VAR, prev_results);

        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.max_steps, 10);
        assert_eq!(config.search_results, DEFAULT_MAX_RESULTS);
    }
}
