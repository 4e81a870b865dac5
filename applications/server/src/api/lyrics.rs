/// Lyric API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use tingting_core::types::{Lyric, TrackId};

#[derive(Debug, Deserialize)]
pub struct LyricRequest {
    pub content: String,
}

/// GET /api/tracks/:id/lyric
pub async fn get_lyric(
    Path(track_id): Path<TrackId>,
    State(app_state): State<AppState>,
) -> Result<Json<Lyric>> {
    let lyric = app_state
        .db
        .get_lyric(track_id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Lyric not found".to_string()))?;
    Ok(Json(lyric))
}

/// POST /api/tracks/:id/lyric
/// Create or replace the lyric; `content` comes from a JSON body or the query
pub async fn put_lyric(
    Path(track_id): Path<TrackId>,
    State(app_state): State<AppState>,
    query: Option<Query<LyricRequest>>,
    body: Option<Json<LyricRequest>>,
) -> Result<Json<Lyric>> {
    let request = body
        .map(|Json(req)| req)
        .or_else(|| query.map(|Query(req)| req))
        .ok_or_else(|| ServerError::BadRequest("content is required".to_string()))?;

    if app_state.db.get_track(track_id).await?.is_none() {
        return Err(ServerError::NotFound("Track not found".to_string()));
    }

    let lyric = app_state.db.upsert_lyric(track_id, &request.content).await?;
    Ok(Json(lyric))
}

/// DELETE /api/tracks/:id/lyric
pub async fn delete_lyric(
    Path(track_id): Path<TrackId>,
    State(app_state): State<AppState>,
) -> Result<Json<serde_json::Value>> {
    if !app_state.db.delete_lyric(track_id).await? {
        return Err(ServerError::NotFound("Lyric not found".to_string()));
    }

    Ok(Json(serde_json::json!({ "message": "Lyric deleted" })))
}
