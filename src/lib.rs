//! # webforge
//!
//! An LLM-driven static site builder with a browser chat UI.
//!
//! This library provides:
//! - An HTTP API that runs a tool-calling agent on user prompts
//! - Three tools (run command, write file, read file) scoped to a workspace
//! - Live preview and zip download of the generated sites
//! - Integration with OpenRouter for LLM access
//!
//! ## Architecture
//!
//! The agent follows the "tools in a loop" pattern:
//! 1. Receive a prompt via the API
//! 2. Call the LLM with the conversation history and available tools
//! 3. Execute any requested tool calls inside the workspace, feed results back
//! 4. Repeat until the model answers with plain text
//!
//! ## Example
//!
//! ```rust,ignore
//! use webforge::{api, config::Config};
//!
//! let config = Config::from_env()?;
//! api::serve(config).await?;
//! ```

pub mod agent;
pub mod api;
pub mod config;
pub mod llm;
pub mod tools;
pub mod workspace;

pub use config::Config;
