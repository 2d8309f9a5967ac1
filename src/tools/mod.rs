//! Tools the model can call while building a site.
//!
//! Each tool implements the [`Tool`] trait and is registered in a
//! [`ToolRegistry`]. Tools return plain strings: failures are stringified
//! with a leading `❌` marker so the model (and the chat UI) can react to
//! them, rather than aborting the agent loop.

mod files;
mod terminal;

pub use files::{ReadFile, WriteFile};
pub use terminal::RunCommand;

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde_json::Value;

use crate::llm::ToolSchema;

/// A tool callable by the model.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name as advertised in the function schema.
    fn name(&self) -> &str;

    /// One-line description shown to the model.
    fn description(&self) -> &str;

    /// JSON schema of the tool's parameters.
    fn parameters_schema(&self) -> Value;

    /// Execute the tool with JSON arguments inside the workspace.
    async fn execute(&self, args: Value, workspace: &Path) -> anyhow::Result<String>;
}

/// Name and description pair for prompt building.
pub struct ToolInfo {
    pub name: String,
    pub description: String,
}

/// Registry of available tools, looked up by name.
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Registry with the standard site-builder tool set.
    pub fn new() -> Self {
        let mut registry = Self {
            tools: HashMap::new(),
        };
        registry.register(Box::new(RunCommand));
        registry.register(Box::new(WriteFile));
        registry.register(Box::new(ReadFile));
        registry
    }

    fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// List registered tools for prompt construction.
    pub fn list_tools(&self) -> Vec<ToolInfo> {
        let mut infos: Vec<ToolInfo> = self
            .tools
            .values()
            .map(|t| ToolInfo {
                name: t.name().to_string(),
                description: t.description().to_string(),
            })
            .collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos
    }

    /// Build the function schemas sent to the LLM.
    pub fn get_tool_schemas(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<ToolSchema> = self
            .tools
            .values()
            .map(|t| ToolSchema::function(t.name(), t.description(), t.parameters_schema()))
            .collect();
        schemas.sort_by(|a, b| a.function.name.cmp(&b.function.name));
        schemas
    }

    /// Execute a tool by name.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown tool names; tool-level failures come back
    /// as `Ok` strings with a `❌` marker.
    pub async fn execute(
        &self,
        name: &str,
        args: Value,
        workspace: &Path,
    ) -> anyhow::Result<String> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown tool: {}", name))?;
        tool.execute(args, workspace).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
