/// Library scan API routes
use crate::{
    error::{Result, ServerError},
    jobs::{ScanJobError, ScanStatus},
    state::AppState,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize)]
pub struct ScanRequest {
    /// Directory to scan instead of the configured music root
    #[serde(default)]
    pub music_dir: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub status: String,
    pub message: String,
    pub music_dir: PathBuf,
}

impl From<ScanJobError> for ServerError {
    fn from(err: ScanJobError) -> Self {
        ServerError::Conflict(err.to_string())
    }
}

/// POST /api/scan
/// Start a background scan; `music_dir` comes from a JSON body or the query
pub async fn trigger_scan(
    State(app_state): State<AppState>,
    Query(query): Query<ScanRequest>,
    body: Option<Json<ScanRequest>>,
) -> Result<(StatusCode, Json<ScanResponse>)> {
    let music_dir = body
        .and_then(|Json(req)| req.music_dir)
        .or(query.music_dir)
        .filter(|dir| !dir.trim().is_empty())
        .map_or_else(|| app_state.config.library.music_dir.clone(), PathBuf::from);

    app_state.scan_jobs.submit(music_dir.clone()).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(ScanResponse {
            status: "started".to_string(),
            message: "Music scan started".to_string(),
            music_dir,
        }),
    ))
}

/// GET /api/scan/status
pub async fn scan_status(State(app_state): State<AppState>) -> Json<ScanStatus> {
    Json(app_state.scan_jobs.status().await)
}
