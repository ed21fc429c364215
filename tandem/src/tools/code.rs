//! Sandboxed code execution tool.
//!
//! Runs submitted code in a subprocess and captures stdout. Execution
//! failures are NOT `ToolError`s: the failure text is returned as the tool
//! result so the calling agent can read the error and try again. Only a
//! missing `code` argument is rejected as invalid input.

use async_trait::async_trait;
use serde_json::json;
use tokio::process::Command;

use crate::tools::{Tool, ToolError, ToolSpec};

/// Executes Python code via `python3 -c` and returns captured stdout.
pub struct PythonRepl {
    interpreter: String,
}

impl PythonRepl {
    pub fn new() -> Self {
        Self {
            interpreter: "python3".to_string(),
        }
    }

    /// Overrides the interpreter binary (builder). Used by deployments that
    /// pin a specific interpreter path and by tests.
    pub fn with_interpreter(mut self, interpreter: impl Into<String>) -> Self {
        self.interpreter = interpreter.into();
        self
    }

    fn extract_code(args: &serde_json::Value) -> Result<String, ToolError> {
        if let Some(code) = args.as_str() {
            return Ok(code.to_string());
        }
        args.get("code")
            .and_then(|v| v.as_str())
            .map(String::from)
            .ok_or_else(|| ToolError::InvalidInput("missing code".to_string()))
    }
}

impl Default for PythonRepl {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for PythonRepl {
    fn name(&self) -> &str {
        "python_repl"
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "python_repl".to_string(),
            description: Some(
                "Execute Python code. If you want to see the output of a value, \
                 print it with print(...). The printed output is visible to the user."
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "code": { "type": "string", "description": "Python code to execute." }
                },
                "required": ["code"]
            }),
        }
    }

    async fn call(&self, args: serde_json::Value) -> Result<String, ToolError> {
        let code = Self::extract_code(&args)?;
        tracing::debug!(interpreter = %self.interpreter, "executing code");

        let output = match Command::new(&self.interpreter)
            .arg("-c")
            .arg(&code)
            .output()
            .await
        {
            Ok(output) => output,
            Err(e) => return Ok(format!("Failed to execute. Error: {}", e)),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Ok(format!("Failed to execute. Error: {}", stderr.trim()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(format!(
            "Successfully executed:\n```python\n{}\n```\nStdout: {}",
            code, stdout
        ))
    }
}
