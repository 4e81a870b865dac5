use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tingting_core::{error::Result, types::*, TingError};

fn from_row(row: &SqliteRow) -> Album {
    Album {
        id: row.get("id"),
        title: row.get("title"),
        artist_id: row.get("artist_id"),
        cover_path: row.get("cover_path"),
    }
}

pub async fn get_all(pool: &SqlitePool, page: Page) -> Result<Vec<Album>> {
    let rows = sqlx::query(
        "SELECT id, title, artist_id, cover_path
         FROM albums
         ORDER BY id
         LIMIT ? OFFSET ?",
    )
    .bind(page.limit)
    .bind(page.skip)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(from_row).collect())
}

pub async fn get_by_id(pool: &SqlitePool, id: AlbumId) -> Result<Option<Album>> {
    let row = sqlx::query("SELECT id, title, artist_id, cover_path FROM albums WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(from_row))
}

/// Oldest album with this exact title and artist (`IS` so a missing artist matches NULL)
pub async fn find(
    pool: &SqlitePool,
    title: &str,
    artist_id: Option<ArtistId>,
) -> Result<Option<Album>> {
    let row = sqlx::query(
        "SELECT id, title, artist_id, cover_path
         FROM albums
         WHERE title = ? AND artist_id IS ?
         ORDER BY id
         LIMIT 1",
    )
    .bind(title)
    .bind(artist_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(from_row))
}

/// Insert a new album row. No lookup happens here.
pub async fn create(pool: &SqlitePool, title: &str, artist_id: Option<ArtistId>) -> Result<Album> {
    let result = sqlx::query("INSERT INTO albums (title, artist_id) VALUES (?, ?)")
        .bind(title)
        .bind(artist_id)
        .execute(pool)
        .await?;

    let id = result.last_insert_rowid();

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| TingError::storage("Failed to retrieve created album"))
}

pub async fn set_cover(pool: &SqlitePool, id: AlbumId, cover_path: Option<&str>) -> Result<bool> {
    let result = sqlx::query("UPDATE albums SET cover_path = ? WHERE id = ?")
        .bind(cover_path)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
