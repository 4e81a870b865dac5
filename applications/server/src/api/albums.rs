/// Albums API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use tingting_core::types::{Album, AlbumId, Page};

/// GET /api/albums?skip=&limit=
pub async fn list_albums(
    State(app_state): State<AppState>,
    Query(page): Query<Page>,
) -> Result<Json<Vec<Album>>> {
    let albums = app_state
        .db
        .get_albums(Page::new(page.skip, page.limit))
        .await?;
    Ok(Json(albums))
}

/// GET /api/albums/:id
pub async fn get_album(
    Path(id): Path<AlbumId>,
    State(app_state): State<AppState>,
) -> Result<Json<Album>> {
    let album = app_state
        .db
        .get_album(id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Album not found".to_string()))?;
    Ok(Json(album))
}
