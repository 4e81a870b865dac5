/// Cover art API
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use std::path::Path as FsPath;
use tingting_core::TrackId;

/// Compact disc drawing served when nothing better exists
pub const BUILTIN_COVER_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="300" height="300" viewBox="0 0 300 300">
  <rect width="300" height="300" fill="#2c3e50"/>
  <circle cx="150" cy="150" r="120" fill="#34495e"/>
  <circle cx="150" cy="150" r="112" fill="none" stroke="#3d566e" stroke-width="2"/>
  <circle cx="150" cy="150" r="92" fill="none" stroke="#3d566e" stroke-width="2"/>
  <circle cx="150" cy="150" r="72" fill="none" stroke="#3d566e" stroke-width="2"/>
  <circle cx="150" cy="150" r="30" fill="#2c3e50"/>
  <circle cx="150" cy="150" r="8" fill="#ecf0f1"/>
</svg>
"##;

/// GET /api/tracks/:id/cover
/// Album art if the album has one on disk, otherwise the default cover
pub async fn get_cover(
    Path(track_id): Path<TrackId>,
    State(app_state): State<AppState>,
) -> Result<Response> {
    let track = app_state
        .db
        .get_track(track_id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Track not found".to_string()))?;

    let album = match track.album_id {
        Some(album_id) => app_state.db.get_album(album_id).await?,
        None => None,
    };

    if let Some(cover_path) = album.and_then(|album| album.cover_path) {
        if let Some(response) = read_image(FsPath::new(&cover_path)).await {
            return Ok(response);
        }
        tracing::debug!("Album cover {} unreadable, using default", cover_path);
    }

    if let Some(default_cover) = &app_state.config.library.default_cover {
        if let Some(response) = read_image(default_cover).await {
            return Ok(response);
        }
        tracing::warn!(
            "Configured default cover {} unreadable, using built-in",
            default_cover.display()
        );
    }

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], BUILTIN_COVER_SVG).into_response())
}

/// Image bytes with a guessed content type; `None` if the file can't be read
async fn read_image(path: &FsPath) -> Option<Response> {
    let bytes = tokio::fs::read(path).await.ok()?;
    let mime_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string();

    Some(([(header::CONTENT_TYPE, mime_type)], bytes).into_response())
}
