/// Artists API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use tingting_core::types::{Artist, ArtistId, Page};

/// GET /api/artists?skip=&limit=
pub async fn list_artists(
    State(app_state): State<AppState>,
    Query(page): Query<Page>,
) -> Result<Json<Vec<Artist>>> {
    let artists = app_state
        .db
        .get_artists(Page::new(page.skip, page.limit))
        .await?;
    Ok(Json(artists))
}

/// GET /api/artists/:id
pub async fn get_artist(
    Path(id): Path<ArtistId>,
    State(app_state): State<AppState>,
) -> Result<Json<Artist>> {
    let artist = app_state
        .db
        .get_artist(id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Artist not found".to_string()))?;
    Ok(Json(artist))
}
