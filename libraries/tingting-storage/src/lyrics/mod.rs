use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tingting_core::{error::Result, types::*, TingError};

fn from_row(row: &SqliteRow) -> Lyric {
    Lyric {
        id: row.get("id"),
        track_id: row.get("track_id"),
        content: row.get("content"),
    }
}

pub async fn get_by_track(pool: &SqlitePool, track_id: TrackId) -> Result<Option<Lyric>> {
    let row = sqlx::query("SELECT id, track_id, content FROM lyrics WHERE track_id = ?")
        .bind(track_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(from_row))
}

/// Insert or overwrite the single lyric of a track. The row id is kept on overwrite.
pub async fn upsert(pool: &SqlitePool, track_id: TrackId, content: &str) -> Result<Lyric> {
    sqlx::query(
        "INSERT INTO lyrics (track_id, content) VALUES (?, ?)
         ON CONFLICT(track_id) DO UPDATE SET content = excluded.content",
    )
    .bind(track_id)
    .bind(content)
    .execute(pool)
    .await?;

    get_by_track(pool, track_id)
        .await?
        .ok_or_else(|| TingError::storage("Failed to retrieve stored lyric"))
}

pub async fn delete(pool: &SqlitePool, track_id: TrackId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM lyrics WHERE track_id = ?")
        .bind(track_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
