//! Shell command execution tool.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::process::Command;

use super::Tool;

/// Run a shell command in the workspace.
pub struct RunCommand;

#[async_trait]
impl Tool for RunCommand {
    fn name(&self) -> &str {
        "run_command"
    }

    fn description(&self) -> &str {
        "Execute a shell command in the workspace directory. Use to create site folders and scaffold files (e.g. mkdir)."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "command": {
                    "type": "string",
                    "description": "The shell command to execute"
                },
                "timeout_secs": {
                    "type": "integer",
                    "description": "Timeout in seconds (default: 60)"
                }
            },
            "required": ["command"]
        })
    }

    async fn execute(&self, args: Value, workspace: &Path) -> anyhow::Result<String> {
        let command = args["command"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'command' argument"))?;
        let timeout_secs = args["timeout_secs"].as_u64().unwrap_or(60);

        tracing::info!("Executing command: {}", command);

        // Determine shell based on OS
        let (shell, shell_arg) = if cfg!(target_os = "windows") {
            ("cmd", "/C")
        } else {
            ("sh", "-c")
        };

        let output = match tokio::time::timeout(
            std::time::Duration::from_secs(timeout_secs),
            Command::new(shell)
                .arg(shell_arg)
                .arg(command)
                .current_dir(workspace)
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .output(),
        )
        .await
        {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return Ok(format!("❌ Command failed: {}", e)),
            Err(_) => {
                return Ok(format!(
                    "❌ Command timed out after {} seconds",
                    timeout_secs
                ))
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        // The model treats any stderr output as a failure signal
        if !output.status.success() || !stderr.trim().is_empty() {
            let mut detail = truncate(stderr.trim(), 4000);
            if detail.is_empty() {
                detail = format!("command exited with {}", output.status);
                if !stdout.trim().is_empty() {
                    detail.push('\n');
                    detail.push_str(&truncate(stdout.trim(), 4000));
                }
            }
            return Ok(format!("❌ Error: {}", detail));
        }

        let body = if stdout.trim().is_empty() {
            "Done".to_string()
        } else {
            truncate(stdout.trim(), 4000)
        };

        Ok(format!("✅ Command executed: {}\n{}", command, body))
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut idx = max;
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }
    format!("{}... [output truncated]", &s[..idx])
}
