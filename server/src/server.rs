//! Web server setup and routing

use std::path::Path;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api;
use crate::error::NetuiError;
use crate::state::AppState;

/// Build the router: API routes, legacy aliases, then the dashboard files.
pub fn router(state: Arc<AppState>, static_dir: &Path) -> Router {
    // Unknown paths under the dashboard fall back to index.html so client-side routes load
    let dashboard = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route("/get/calibration/mode", get(api::get_calibration_mode))
        .route("/get/calibration.json", get(api::get_calibration))
        .route("/get/calibration/history.json", get(api::get_calibration_history))
        .route("/get/objects.json", get(api::get_objects))
        .route("/set/calibration/start", get(api::set_calibration_start))
        .route("/set/calibration/preview", get(api::set_calibration_preview))
        .route("/set/calibration/commit", get(api::set_calibration_commit))
        .route("/set/calibration/revert", get(api::set_calibration_revert))
        .route("/get/{*rest}", get(api::not_found))
        .route("/set/{*rest}", get(api::not_found))
        // Legacy endpoints of the first dashboard
        .route("/calget", get(api::legacy_calget))
        .route("/calset", get(api::set_calibration_preview))
        .route("/calsave", get(api::set_calibration_commit))
        .fallback_service(dashboard)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until the process is stopped.
pub async fn run(state: Arc<AppState>, bind: &str, static_dir: &Path) -> Result<(), NetuiError> {
    let app = router(state, static_dir);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!(address = %bind, static_dir = ?static_dir, "Starting NetUI server");
    axum::serve(listener, app).await?;
    Ok(())
}
