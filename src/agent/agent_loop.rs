//! Core agent loop implementation.

use std::sync::Arc;

use crate::config::Config;
use crate::llm::{ChatMessage, LlmClient, OpenRouterClient, Role, ToolCall};
use crate::tools::ToolRegistry;
use crate::workspace;

use super::prompt::build_system_prompt;

/// The site-builder agent.
pub struct Agent {
    config: Config,
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
}

/// What one agent run produced: the transcript lines shown in the chat UI
/// and the folder the run created, if any.
#[derive(Debug, Default)]
pub struct AgentOutcome {
    pub transcript: Vec<String>,
    pub created_folder: Option<String>,
}

impl Agent {
    /// Create a new agent with the given configuration.
    pub fn new(config: Config) -> Self {
        let llm = Arc::new(OpenRouterClient::new(config.api_key.clone()));
        let tools = ToolRegistry::new();

        Self { config, llm, tools }
    }

    /// Create an agent with a custom LLM client (used in tests).
    pub fn with_client(config: Config, llm: Arc<dyn LlmClient>) -> Self {
        Self {
            config,
            llm,
            tools: ToolRegistry::new(),
        }
    }

    /// Run one user query against the shared conversation history.
    ///
    /// The query, any assistant tool-call messages, and all tool results are
    /// appended to `history`; the final plain-text answer only lands in the
    /// transcript. The system prompt is rebuilt per call and never stored.
    pub async fn run(
        &self,
        history: &mut Vec<ChatMessage>,
        query: &str,
    ) -> anyhow::Result<AgentOutcome> {
        let mut outcome = AgentOutcome::default();

        history.push(ChatMessage::text(Role::User, query));

        let system_prompt = build_system_prompt(std::env::consts::OS, &self.tools);
        let tool_schemas = self.tools.get_tool_schemas();

        for iteration in 0..self.config.max_iterations {
            tracing::debug!("Agent iteration {}", iteration + 1);

            let mut messages = Vec::with_capacity(history.len() + 1);
            messages.push(ChatMessage::text(Role::System, system_prompt.clone()));
            messages.extend(history.iter().cloned());

            let response = self
                .llm
                .chat_completion(&self.config.default_model, &messages, Some(&tool_schemas))
                .await?;

            if let Some(tool_calls) = &response.tool_calls {
                if !tool_calls.is_empty() {
                    history.push(ChatMessage::assistant_tool_calls(
                        response.content.clone(),
                        tool_calls.clone(),
                    ));

                    for tool_call in tool_calls {
                        let result = self.execute_tool_call(tool_call, &mut outcome).await;

                        history.push(ChatMessage::tool_result(
                            tool_call.id.clone(),
                            result.clone(),
                        ));
                        outcome
                            .transcript
                            .push(format!("✅ {}: {}", tool_call.function.name, result));
                    }

                    continue;
                }
            }

            // No tool calls - this is the final response
            if let Some(content) = response.content {
                outcome.transcript.push(format!("📝 {}", content));
                return Ok(outcome);
            }

            return Err(anyhow::anyhow!("LLM returned empty response"));
        }

        Err(anyhow::anyhow!(
            "Max iterations ({}) reached without completion",
            self.config.max_iterations
        ))
    }

    /// Execute a single tool call and track folders created via mkdir.
    async fn execute_tool_call(&self, tool_call: &ToolCall, outcome: &mut AgentOutcome) -> String {
        let name = &tool_call.function.name;
        let args: serde_json::Value = serde_json::from_str(&tool_call.function.arguments)
            .unwrap_or(serde_json::Value::Null);

        tracing::info!("Tool used: {} {}", name, args);

        let command = args["command"].as_str().map(str::to_string);

        let result = match self
            .tools
            .execute(name, args, &self.config.workspace_path)
            .await
        {
            Ok(output) => output,
            Err(e) => format!("❌ {}", e),
        };

        // Record the folder only when the mkdir actually succeeded; a failed
        // command must not produce preview/download links to a missing dir.
        if name == "run_command" && !result.starts_with('❌') {
            if let Some(folder) = command.as_deref().and_then(workspace::folder_from_mkdir) {
                tracing::info!("Created folder: {}", folder);
                outcome.created_folder = Some(folder);
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{FunctionCall, LlmResponse, ToolSchema};
    use async_trait::async_trait;
    use std::path::PathBuf;
    use tokio::sync::Mutex;

    /// LLM stub that replays a scripted sequence of responses.
    struct ScriptedLlm {
        responses: Mutex<Vec<LlmResponse>>,
    }

    impl ScriptedLlm {
        fn new(mut responses: Vec<LlmResponse>) -> Self {
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
            }
        }
    }

    #[async_trait]
    impl LlmClient for ScriptedLlm {
        async fn chat_completion(
            &self,
            _model: &str,
            _messages: &[ChatMessage],
            _tools: Option<&[ToolSchema]>,
        ) -> anyhow::Result<LlmResponse> {
            self.responses
                .lock()
                .await
                .pop()
                .ok_or_else(|| anyhow::anyhow!("script exhausted"))
        }
    }

    fn tool_call(id: &str, name: &str, arguments: serde_json::Value) -> ToolCall {
        ToolCall {
            id: id.to_string(),
            call_type: "function".to_string(),
            function: FunctionCall {
                name: name.to_string(),
                arguments: arguments.to_string(),
            },
        }
    }

    fn text_response(content: &str) -> LlmResponse {
        LlmResponse {
            content: Some(content.to_string()),
            tool_calls: None,
        }
    }

    fn tool_response(calls: Vec<ToolCall>) -> LlmResponse {
        LlmResponse {
            content: None,
            tool_calls: Some(calls),
        }
    }

    fn test_agent(workspace: PathBuf, responses: Vec<LlmResponse>) -> Agent {
        let config = Config::new("key".to_string(), "test/model".to_string(), workspace);
        Agent::with_client(config, Arc::new(ScriptedLlm::new(responses)))
    }

    #[tokio::test]
    async fn test_plain_text_answer_ends_the_loop() {
        let dir = tempfile::tempdir().unwrap();
        let agent = test_agent(
            dir.path().to_path_buf(),
            vec![text_response("Nothing to build.")],
        );

        let mut history = Vec::new();
        let outcome = agent.run(&mut history, "hello").await.unwrap();

        assert_eq!(outcome.transcript, vec!["📝 Nothing to build."]);
        assert!(outcome.created_folder.is_none());
        // Only the user message lands in history; the final text does not.
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].role, Role::User);
    }

    #[tokio::test]
    async fn test_tool_calls_are_executed_and_fed_back() {
        let dir = tempfile::tempdir().unwrap();
        let agent = test_agent(
            dir.path().to_path_buf(),
            vec![
                tool_response(vec![tool_call(
                    "call_1",
                    "write_file",
                    serde_json::json!({"path": "demo/index.html", "content": "<html></html>"}),
                )]),
                text_response("Built the page."),
            ],
        );

        let mut history = Vec::new();
        let outcome = agent.run(&mut history, "make a page").await.unwrap();

        assert!(dir.path().join("demo/index.html").exists());
        assert_eq!(outcome.transcript.len(), 2);
        assert_eq!(
            outcome.transcript[0],
            "✅ write_file: ✅ Wrote content to demo/index.html"
        );
        assert_eq!(outcome.transcript[1], "📝 Built the page.");

        // user, assistant tool-call, tool result
        assert_eq!(history.len(), 3);
        assert_eq!(history[1].role, Role::Assistant);
        assert_eq!(history[2].role, Role::Tool);
        assert_eq!(history[2].tool_call_id.as_deref(), Some("call_1"));
    }

    #[tokio::test]
    async fn test_mkdir_commands_set_created_folder() {
        let dir = tempfile::tempdir().unwrap();
        let agent = test_agent(
            dir.path().to_path_buf(),
            vec![
                tool_response(vec![tool_call(
                    "call_1",
                    "run_command",
                    serde_json::json!({"command": "mkdir -p coffee-shop"}),
                )]),
                text_response("Done."),
            ],
        );

        let mut history = Vec::new();
        let outcome = agent.run(&mut history, "make a site").await.unwrap();

        assert_eq!(outcome.created_folder.as_deref(), Some("coffee-shop"));
        assert!(dir.path().join("coffee-shop").is_dir());
    }

    #[tokio::test]
    async fn test_failed_mkdir_does_not_set_created_folder() {
        let dir = tempfile::tempdir().unwrap();
        let agent = test_agent(
            dir.path().to_path_buf(),
            vec![
                tool_response(vec![tool_call(
                    "call_1",
                    "run_command",
                    serde_json::json!({"command": "mkdir missingparent/child"}),
                )]),
                text_response("Could not create the folder."),
            ],
        );

        let mut history = Vec::new();
        let outcome = agent.run(&mut history, "make a site").await.unwrap();

        assert!(outcome.transcript[0].contains("❌"));
        assert!(outcome.created_folder.is_none());
        assert!(!dir.path().join("missingparentchild").exists());
    }

    #[tokio::test]
    async fn test_tool_failures_are_stringified_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let agent = test_agent(
            dir.path().to_path_buf(),
            vec![
                tool_response(vec![tool_call(
                    "call_1",
                    "read_file",
                    serde_json::json!({"path": "missing.html"}),
                )]),
                text_response("File was missing."),
            ],
        );

        let mut history = Vec::new();
        let outcome = agent.run(&mut history, "read it").await.unwrap();

        assert!(outcome.transcript[0].contains("❌ Could not read missing.html"));
        assert_eq!(outcome.transcript[1], "📝 File was missing.");
    }

    #[tokio::test]
    async fn test_iteration_cap_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::new(
            "key".to_string(),
            "test/model".to_string(),
            dir.path().to_path_buf(),
        );
        config.max_iterations = 2;

        let responses = vec![
            tool_response(vec![tool_call(
                "call_1",
                "run_command",
                serde_json::json!({"command": "true"}),
            )]),
            tool_response(vec![tool_call(
                "call_2",
                "run_command",
                serde_json::json!({"command": "true"}),
            )]),
            text_response("never reached"),
        ];
        let agent = Agent::with_client(config, Arc::new(ScriptedLlm::new(responses)));

        let mut history = Vec::new();
        let result = agent.run(&mut history, "loop forever").await;
        assert!(result.is_err());
    }
}
