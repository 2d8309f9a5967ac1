//! API request and response types.
//!
//! Field names mirror what the client UI sends and expects, hence the
//! camelCase renames.

use serde::{Deserialize, Serialize};

/// Request to run the agent on a user prompt.
#[derive(Debug, Clone, Deserialize)]
pub struct RunAgentRequest {
    /// The user's prompt
    pub query: String,
}

/// Response after an agent run.
#[derive(Debug, Clone, Serialize)]
pub struct RunAgentResponse {
    /// Always "batch"; the client renders the result line by line
    #[serde(rename = "type")]
    pub response_type: String,

    /// Transcript lines joined by newlines
    pub result: String,

    /// Last created folder name, or empty when none/invalid
    pub folder: String,
}

/// Request to save an edited file.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveRequest {
    #[serde(rename = "filePath")]
    pub file_path: String,

    pub content: String,
}

/// Successful save acknowledgement.
#[derive(Debug, Clone, Serialize)]
pub struct SaveResponse {
    pub status: String,
}

/// Generic error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_agent_response_uses_client_field_names() {
        let response = RunAgentResponse {
            response_type: "batch".to_string(),
            result: "📝 done".to_string(),
            folder: "demo".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["type"], "batch");
        assert_eq!(json["folder"], "demo");
    }

    #[test]
    fn test_save_request_accepts_camel_case() {
        let request: SaveRequest =
            serde_json::from_str(r#"{"filePath": "demo/index.html", "content": "x"}"#).unwrap();
        assert_eq!(request.file_path, "demo/index.html");
    }
}
