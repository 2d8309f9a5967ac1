//! Agent module - the site-builder loop.
//!
//! The agent follows a "tools in a loop" pattern:
//! 1. Append the user query to the shared conversation history
//! 2. Call the LLM with the system prompt, history, and available tools
//! 3. If the LLM requests tool calls, execute them and feed results back
//! 4. Repeat until the LLM answers with plain text or the iteration cap hits

mod agent_loop;
mod prompt;

pub use agent_loop::{Agent, AgentOutcome};
pub use prompt::build_system_prompt;
