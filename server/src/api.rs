//! HTTP handlers for the `/get/...` and `/set/...` API
//!
//! Calibration actions answer `200` with a newline-delimited text body whose
//! first line is `OK` or an error description. JSON listings wrap their rows
//! in `{ "result": [...] }`.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::calibration::CalibrationError;
use crate::state::{lock_calibration, AppState};

const DEFAULT_HISTORY_LIMIT: usize = 100;

#[derive(Serialize)]
pub struct ResultList<T> {
    result: Vec<T>,
}

impl<T> ResultList<T> {
    fn new(result: Vec<T>) -> Self {
        Self { result }
    }
}

fn text(body: String) -> Response {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response()
}

/// `OK` followed by any extra lines, or the error description alone.
fn reply(result: Result<Vec<String>, CalibrationError>) -> Response {
    match result {
        Ok(lines) => {
            let mut body = String::from("OK");
            for line in lines {
                body.push('\n');
                body.push_str(&line);
            }
            text(body)
        }
        Err(e) => {
            debug!("Calibration request refused: {}", e);
            text(e.to_string())
        }
    }
}

/// Preview parameters. The entry's group may arrive as `domain`, `group` or
/// the legacy `module`; the first one present wins.
#[derive(Debug, Default, Deserialize)]
pub struct PreviewQuery {
    #[serde(default)]
    domain: Option<String>,
    #[serde(default)]
    group: Option<String>,
    #[serde(default)]
    module: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    value: String,
}

impl PreviewQuery {
    fn domain(&self) -> &str {
        self.domain
            .as_deref()
            .or(self.group.as_deref())
            .or(self.module.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CommitQuery {
    #[serde(default)]
    comment: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LegacyGetQuery {
    #[serde(default)]
    revert: Option<String>,
}

pub async fn get_calibration_mode(State(state): State<Arc<AppState>>) -> Response {
    let mode = state.calibration().mode();
    reply(Ok(vec![mode.as_str().to_string()]))
}

pub async fn get_calibration(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let parameters = state.calibration().parameters();
    Json(ResultList::new(parameters))
}

pub async fn get_calibration_history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> Response {
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    let calibration = Arc::clone(&state.calibration);
    let result = tokio::task::spawn_blocking(move || {
        let entries = lock_calibration(&calibration).history(limit);
        entries
    })
    .await
    .map_err(|e| format!("History task panicked: {}", e))
    .and_then(|r| r.map_err(|e| e.to_string()));

    match result {
        Ok(entries) => Json(ResultList::new(entries)).into_response(),
        Err(e) => {
            error!("Failed to read calibration history: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e).into_response()
        }
    }
}

pub async fn get_objects(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ResultList::new(state.objects.clone()))
}

pub async fn set_calibration_start(State(state): State<Arc<AppState>>) -> Response {
    state.calibration().start();
    reply(Ok(vec![]))
}

pub async fn set_calibration_preview(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PreviewQuery>,
) -> Response {
    let outcome = state
        .calibration()
        .preview(query.domain(), &query.name, &query.value);
    reply(outcome.map(|o| vec![o.value, o.hint.unwrap_or_default()]))
}

pub async fn set_calibration_commit(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CommitQuery>,
) -> Response {
    let calibration = Arc::clone(&state.calibration);
    let result = tokio::task::spawn_blocking(move || {
        let committed = lock_calibration(&calibration).commit(&query.comment);
        committed
    })
    .await
    .unwrap_or_else(|e| Err(CalibrationError::Store(format!("Commit task panicked: {}", e))));
    reply(result.map(|_| vec![]))
}

pub async fn set_calibration_revert(State(state): State<Arc<AppState>>) -> Response {
    let result = state.calibration().revert();
    reply(result.map(|_| vec![]))
}

/// Legacy `/calget`: optionally reverts, then lists the parameters.
pub async fn legacy_calget(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LegacyGetQuery>,
) -> impl IntoResponse {
    let mut calibration = state.calibration();
    if query.revert.as_deref() == Some("1") {
        if let Err(e) = calibration.revert() {
            debug!("Legacy revert ignored: {}", e);
        }
    }
    Json(ResultList::new(calibration.parameters()))
}

pub async fn not_found() -> impl IntoResponse {
    StatusCode::NOT_FOUND
}
