/// Playlists API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use tingting_core::types::{
    CreatePlaylist, Page, Playlist, PlaylistId, PlaylistTrack, PlaylistType, PlaylistWithTracks,
    TrackId,
};

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePlaylistRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct AddTrackRequest {
    pub track_id: TrackId,
    #[serde(default)]
    pub order: i64,
}

/// Playlist names become directory names under the music root
fn validate_name(name: &str) -> Result<&str> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ServerError::BadRequest(
            "Playlist name must not be empty".to_string(),
        ));
    }

    if name.contains(['/', '\\']) || name == "." || name.contains("..") {
        return Err(ServerError::BadRequest(format!(
            "Invalid playlist name: {name}"
        )));
    }

    Ok(name)
}

/// GET /api/playlists?skip=&limit=
pub async fn list_playlists(
    State(app_state): State<AppState>,
    Query(page): Query<Page>,
) -> Result<Json<Vec<Playlist>>> {
    let playlists = app_state
        .db
        .get_playlists(Page::new(page.skip, page.limit))
        .await?;
    Ok(Json(playlists))
}

/// POST /api/playlists
/// Create a custom playlist and its directory under the music root
pub async fn create_playlist(
    State(app_state): State<AppState>,
    Json(req): Json<CreatePlaylistRequest>,
) -> Result<Json<Playlist>> {
    let name = validate_name(&req.name)?;

    let playlist_dir = app_state.config.library.music_dir.join(name);
    tokio::fs::create_dir_all(&playlist_dir).await?;

    let playlist = app_state
        .db
        .create_playlist(CreatePlaylist {
            name: name.to_string(),
            playlist_type: PlaylistType::Custom,
            music_dir: Some(playlist_dir.to_string_lossy().into_owned()),
        })
        .await?;

    tracing::info!("Created playlist '{}' ({})", playlist.name, playlist.id);

    Ok(Json(playlist))
}

/// GET /api/playlists/:id
/// Get playlist details with tracks
pub async fn get_playlist(
    Path(id): Path<PlaylistId>,
    State(app_state): State<AppState>,
) -> Result<Json<PlaylistWithTracks>> {
    let playlist = app_state
        .db
        .get_playlist_with_tracks(id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Playlist not found".to_string()))?;

    Ok(Json(playlist))
}

/// PUT /api/playlists/:id
/// Update playlist name
pub async fn update_playlist(
    Path(id): Path<PlaylistId>,
    State(app_state): State<AppState>,
    Json(req): Json<UpdatePlaylistRequest>,
) -> Result<Json<Playlist>> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(ServerError::BadRequest(
            "Playlist name must not be empty".to_string(),
        ));
    }

    let playlist = app_state
        .db
        .update_playlist(id, name)
        .await?
        .ok_or_else(|| ServerError::NotFound("Playlist not found".to_string()))?;

    Ok(Json(playlist))
}

/// DELETE /api/playlists/:id
/// Delete a playlist; its tracks and directory are kept
pub async fn delete_playlist(
    Path(id): Path<PlaylistId>,
    State(app_state): State<AppState>,
) -> Result<Json<serde_json::Value>> {
    if !app_state.db.delete_playlist(id).await? {
        return Err(ServerError::NotFound("Playlist not found".to_string()));
    }

    Ok(Json(serde_json::json!({ "message": "Playlist deleted" })))
}

/// POST /api/playlists/:id/tracks
/// `track_id` and `order` come from a JSON body or the query
pub async fn add_track_to_playlist(
    Path(id): Path<PlaylistId>,
    State(app_state): State<AppState>,
    query: Option<Query<AddTrackRequest>>,
    body: Option<Json<AddTrackRequest>>,
) -> Result<Json<PlaylistTrack>> {
    let req = body
        .map(|Json(req)| req)
        .or_else(|| query.map(|Query(req)| req))
        .ok_or_else(|| ServerError::BadRequest("track_id is required".to_string()))?;

    let membership = app_state
        .db
        .add_track_to_playlist(id, req.track_id, req.order)
        .await?;

    Ok(Json(membership))
}

/// DELETE /api/playlists/:id/tracks/:track_id
pub async fn remove_track_from_playlist(
    Path((id, track_id)): Path<(PlaylistId, TrackId)>,
    State(app_state): State<AppState>,
) -> Result<Json<serde_json::Value>> {
    if !app_state
        .db
        .remove_track_from_playlist(id, track_id)
        .await?
    {
        return Err(ServerError::NotFound(
            "Track not found in playlist".to_string(),
        ));
    }

    Ok(Json(serde_json::json!({ "message": "Track removed from playlist" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_that_escape_the_music_root_are_rejected() {
        assert!(validate_name("../etc").is_err());
        assert!(validate_name("a/b").is_err());
        assert!(validate_name("a\\b").is_err());
        assert!(validate_name("..").is_err());
        assert!(validate_name(".").is_err());
        assert!(validate_name("   ").is_err());
    }

    #[test]
    fn ordinary_names_are_trimmed() {
        assert_eq!(validate_name("  Road Trip ").unwrap(), "Road Trip");
        assert_eq!(validate_name("周末").unwrap(), "周末");
    }
}
