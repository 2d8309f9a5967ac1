//! File editing endpoints: open a workspace file in a textarea, save it back.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};

use crate::workspace;

use super::routes::AppState;
use super::types::{ErrorResponse, SaveRequest, SaveResponse};

/// `GET /edit/{folder}/{file}` - serve a file's content in an editable page.
pub async fn edit_file(
    State(state): State<AppState>,
    Path((folder, file)): Path<(String, String)>,
) -> impl IntoResponse {
    let relative = format!("{}/{}", folder, file);
    let full_path = match workspace::resolve(&state.config.workspace_path, &relative) {
        Ok(p) => p,
        Err(_) => return (StatusCode::NOT_FOUND, "File not found").into_response(),
    };

    match tokio::fs::read_to_string(&full_path).await {
        Ok(content) => Html(format!(
            "<textarea style='width:100%;height:90vh'>{}</textarea>",
            escape_html(&content)
        ))
        .into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "File not found").into_response(),
    }
}

/// `POST /save` - write edited content back into the workspace.
pub async fn save_file(
    State(state): State<AppState>,
    Json(request): Json<SaveRequest>,
) -> impl IntoResponse {
    let full_path = match workspace::resolve(&state.config.workspace_path, &request.file_path) {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!("Rejected save path {}: {}", request.file_path, e);
            return save_error();
        }
    };

    match tokio::fs::write(&full_path, &request.content).await {
        Ok(()) => Json(SaveResponse {
            status: "saved".to_string(),
        })
        .into_response(),
        Err(e) => {
            tracing::error!("Failed to save {}: {}", request.file_path, e);
            save_error()
        }
    }
}

fn save_error() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "Failed to save".to_string(),
        }),
    )
        .into_response()
}

/// Minimal escaping so file content cannot close the textarea element.
fn escape_html(content: &str) -> String {
    content
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_neutralizes_tags() {
        assert_eq!(
            escape_html("</textarea><script>"),
            "&lt;/textarea&gt;&lt;script&gt;"
        );
    }

    #[test]
    fn test_escape_html_keeps_plain_text() {
        assert_eq!(escape_html("body { color: red }"), "body { color: red }");
    }
}
