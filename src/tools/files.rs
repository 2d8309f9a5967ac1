//! File read/write tools.
//!
//! Both tools resolve model-supplied paths through the workspace so the agent
//! cannot write or read outside its sandbox directory.

use std::path::Path;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::Tool;
use crate::workspace;

/// Write content to a file inside the workspace, creating parents as needed.
pub struct WriteFile;

#[async_trait]
impl Tool for WriteFile {
    fn name(&self) -> &str {
        "write_file"
    }

    fn description(&self) -> &str {
        "Write content to a file in the workspace. Use for HTML/CSS/JS sources. Parent directories are created automatically."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "File path relative to the workspace, e.g. 'my-site/index.html'"
                },
                "content": {
                    "type": "string",
                    "description": "Full file content to write"
                }
            },
            "required": ["path", "content"]
        })
    }

    async fn execute(&self, args: Value, workspace_path: &Path) -> anyhow::Result<String> {
        let path = args["path"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'path' argument"))?;
        let content = args["content"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'content' argument"))?;

        tracing::info!("Writing file: {}", path);

        let full_path = match workspace::resolve(workspace_path, path) {
            Ok(p) => p,
            Err(e) => return Ok(format!("❌ Failed to write to {}: {}", path, e)),
        };

        if let Some(parent) = full_path.parent() {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                return Ok(format!("❌ Failed to write to {}: {}", path, e));
            }
        }

        match tokio::fs::write(&full_path, content).await {
            Ok(()) => Ok(format!("✅ Wrote content to {}", path)),
            Err(e) => Ok(format!("❌ Failed to write to {}: {}", path, e)),
        }
    }
}

/// Read a file from the workspace.
pub struct ReadFile;

#[async_trait]
impl Tool for ReadFile {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read the content of a workspace file. Always read existing files (nav, footer, shared CSS) before modifying them."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "File path relative to the workspace"
                }
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, args: Value, workspace_path: &Path) -> anyhow::Result<String> {
        let path = args["path"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'path' argument"))?;

        tracing::info!("Reading file: {}", path);

        let full_path = match workspace::resolve(workspace_path, path) {
            Ok(p) => p,
            Err(e) => return Ok(format!("❌ Could not read {}: {}", path, e)),
        };

        match tokio::fs::read_to_string(&full_path).await {
            Ok(content) => Ok(content),
            Err(e) => Ok(format!("❌ Could not read {}: {}", path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();

        let written = WriteFile
            .execute(
                json!({"path": "site/index.html", "content": "<h1>Hi</h1>"}),
                dir.path(),
            )
            .await
            .unwrap();
        assert_eq!(written, "✅ Wrote content to site/index.html");

        let read = ReadFile
            .execute(json!({"path": "site/index.html"}), dir.path())
            .await
            .unwrap();
        assert_eq!(read, "<h1>Hi</h1>");
    }

    #[tokio::test]
    async fn test_read_missing_file_is_stringified() {
        let dir = tempfile::tempdir().unwrap();
        let result = ReadFile
            .execute(json!({"path": "nope.html"}), dir.path())
            .await
            .unwrap();
        assert!(result.starts_with("❌ Could not read nope.html"));
    }

    #[tokio::test]
    async fn test_write_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let result = WriteFile
            .execute(
                json!({"path": "../escape.txt", "content": "x"}),
                dir.path(),
            )
            .await
            .unwrap();
        assert!(result.starts_with("❌ Failed to write to ../escape.txt"));
        assert!(!dir.path().parent().unwrap().join("escape.txt").exists());
    }

    #[tokio::test]
    async fn test_write_missing_content_argument() {
        let dir = tempfile::tempdir().unwrap();
        let result = WriteFile
            .execute(json!({"path": "a.txt"}), dir.path())
            .await;
        assert!(result.is_err());
    }
}
