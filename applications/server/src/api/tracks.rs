/// Tracks API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use tingting_core::types::{Page, TrackId, TrackWithDetails};

/// GET /api/tracks?skip=&limit=
pub async fn list_tracks(
    State(app_state): State<AppState>,
    Query(page): Query<Page>,
) -> Result<Json<Vec<TrackWithDetails>>> {
    let tracks = app_state
        .db
        .get_tracks_with_details(Page::new(page.skip, page.limit))
        .await?;
    Ok(Json(tracks))
}

/// GET /api/tracks/:id
pub async fn get_track(
    Path(id): Path<TrackId>,
    State(app_state): State<AppState>,
) -> Result<Json<TrackWithDetails>> {
    let track = app_state
        .db
        .get_track_with_details(id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Track not found".to_string()))?;
    Ok(Json(track))
}

/// DELETE /api/tracks/:id
/// Removes the catalog entry; the audio file stays on disk
pub async fn delete_track(
    Path(id): Path<TrackId>,
    State(app_state): State<AppState>,
) -> Result<Json<serde_json::Value>> {
    if !app_state.db.delete_track(id).await? {
        return Err(ServerError::NotFound("Track not found".to_string()));
    }

    Ok(Json(serde_json::json!({ "message": "Track deleted" })))
}
