//! The main agent endpoint.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::workspace;

use super::routes::AppState;
use super::types::{ErrorResponse, RunAgentRequest, RunAgentResponse};

/// `POST /runAgent` - run the agent loop on a user prompt.
///
/// The history lock is held for the whole run, so concurrent requests are
/// serialized onto the single shared conversation.
pub async fn run_agent(
    State(state): State<AppState>,
    Json(request): Json<RunAgentRequest>,
) -> impl IntoResponse {
    let mut history = state.history.lock().await;

    let outcome = match state.agent.run(&mut history, &request.query).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Agent run failed: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response();
        }
    };

    let mut last_folder = state.last_created_folder.lock().await;
    if let Some(folder) = outcome.created_folder {
        *last_folder = folder;
    }

    // Re-validate before echoing; an unusable name becomes the empty string.
    if !workspace::is_valid_folder_name(&last_folder) {
        last_folder.clear();
    }

    Json(RunAgentResponse {
        response_type: "batch".to_string(),
        result: outcome.transcript.join("\n"),
        folder: last_folder.clone(),
    })
    .into_response()
}
