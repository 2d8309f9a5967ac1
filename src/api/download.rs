//! Zip download of a generated site folder.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use bytes::Bytes;

use crate::workspace::{self, WorkspaceError};

use super::routes::AppState;

/// `GET /download/{folder}` - stream a zip archive of a workspace folder.
pub async fn download_folder(
    State(state): State<AppState>,
    Path(folder): Path<String>,
) -> impl IntoResponse {
    if !workspace::is_valid_folder_name(&folder) {
        return (StatusCode::BAD_REQUEST, "Invalid folder name").into_response();
    }

    let workspace_path = state.config.workspace_path.clone();
    let folder_name = folder.clone();

    // Archive building is blocking filesystem work
    let result =
        tokio::task::spawn_blocking(move || workspace::zip_folder(&workspace_path, &folder_name))
            .await;

    let bytes = match result {
        Ok(Ok(bytes)) => bytes,
        Ok(Err(WorkspaceError::FolderNotFound(name))) => {
            return (
                StatusCode::NOT_FOUND,
                format!("Folder not found: {}", name),
            )
                .into_response();
        }
        Ok(Err(e)) => {
            tracing::error!("Failed to zip folder {}: {}", folder, e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to build zip").into_response();
        }
        Err(e) => {
            tracing::error!("Zip task panicked: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to build zip").into_response();
        }
    };

    (
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}.zip", folder),
            ),
        ],
        Bytes::from(bytes),
    )
        .into_response()
}
