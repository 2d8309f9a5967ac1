//! Router setup and shared application state.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::agent::Agent;
use crate::config::Config;
use crate::llm::ChatMessage;
use crate::workspace;

use super::types::HealthResponse;
use super::{download, files, run};

/// State shared by all handlers.
///
/// The conversation history and the last created folder persist for the
/// lifetime of the server, matching the single-session chat the UI presents.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub agent: Arc<Agent>,
    pub history: Arc<Mutex<Vec<ChatMessage>>>,
    pub last_created_folder: Arc<Mutex<String>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let agent = Arc::new(Agent::new(config.clone()));
        Self {
            config,
            agent,
            history: Arc::new(Mutex::new(Vec::new())),
            last_created_folder: Arc::new(Mutex::new(String::new())),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let preview = ServeDir::new(&state.config.workspace_path);
    let ui = ServeDir::new(&state.config.public_path);

    Router::new()
        .route("/runAgent", post(run::run_agent))
        .route("/edit/:folder/:file", get(files::edit_file))
        .route("/save", post(files::save_file))
        .route("/download/:folder", get(download::download_folder))
        .route("/health", get(health))
        .nest_service("/preview", preview)
        .fallback_service(ui)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve the HTTP API until shutdown.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    workspace::ensure_exists(&config.workspace_path)?;

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::new(config);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server running at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
