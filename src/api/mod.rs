//! HTTP boundary.
//!
//! One endpoint runs the agent; auxiliary endpoints edit and save individual
//! workspace files and stream a zip of a generated folder. The static client
//! UI and a live preview of the workspace are served alongside.

mod download;
mod files;
mod run;
mod routes;
pub mod types;

pub use routes::{serve, AppState};
