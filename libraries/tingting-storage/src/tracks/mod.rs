use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tingting_core::{error::Result, types::*, TingError};

const TRACK_COLUMNS: &str =
    "t.id, t.title, t.artist_id, t.album_id, t.file_path, t.file_type, t.duration, t.bitrate, t.sample_rate";

fn from_row(row: &SqliteRow) -> Track {
    Track {
        id: row.get("id"),
        title: row.get("title"),
        artist_id: row.get("artist_id"),
        album_id: row.get("album_id"),
        file_path: row.get("file_path"),
        file_type: row.get("file_type"),
        duration: row.get("duration"),
        bitrate: row.get("bitrate"),
        sample_rate: row.get("sample_rate"),
    }
}

fn details_from_row(row: &SqliteRow) -> TrackWithDetails {
    let track = from_row(row);

    let artist = match (track.artist_id, row.get::<Option<String>, _>("artist_name")) {
        (Some(id), Some(name)) => Some(Artist { id, name }),
        _ => None,
    };

    let album = match (track.album_id, row.get::<Option<String>, _>("album_title")) {
        (Some(id), Some(title)) => Some(Album {
            id,
            title,
            artist_id: row.get("album_artist_id"),
            cover_path: row.get("album_cover_path"),
        }),
        _ => None,
    };

    let lyric = row
        .get::<Option<i64>, _>("lyric_id")
        .map(|id| Lyric {
            id,
            track_id: track.id,
            content: row.get("lyric_content"),
        });

    TrackWithDetails {
        track,
        artist,
        album,
        lyric,
    }
}

fn details_query(filter: &str) -> String {
    format!(
        "SELECT {TRACK_COLUMNS},
                ar.name AS artist_name,
                al.title AS album_title, al.artist_id AS album_artist_id,
                al.cover_path AS album_cover_path,
                l.id AS lyric_id, l.content AS lyric_content
         FROM tracks t
         LEFT JOIN artists ar ON t.artist_id = ar.id
         LEFT JOIN albums al ON t.album_id = al.id
         LEFT JOIN lyrics l ON l.track_id = t.id
         {filter}"
    )
}

pub async fn get_all(pool: &SqlitePool, page: Page) -> Result<Vec<Track>> {
    let rows = sqlx::query(&format!(
        "SELECT {TRACK_COLUMNS} FROM tracks t ORDER BY t.id LIMIT ? OFFSET ?"
    ))
    .bind(page.limit)
    .bind(page.skip)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(from_row).collect())
}

pub async fn get_by_id(pool: &SqlitePool, id: TrackId) -> Result<Option<Track>> {
    let row = sqlx::query(&format!("SELECT {TRACK_COLUMNS} FROM tracks t WHERE t.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(from_row))
}

/// Exact path lookup, the dedup key of library scans
pub async fn find_by_path(pool: &SqlitePool, file_path: &str) -> Result<Option<Track>> {
    let row = sqlx::query(&format!(
        "SELECT {TRACK_COLUMNS} FROM tracks t WHERE t.file_path = ?"
    ))
    .bind(file_path)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(from_row))
}

pub async fn create(pool: &SqlitePool, track: CreateTrack) -> Result<Track> {
    let result = sqlx::query(
        "INSERT INTO tracks
            (title, artist_id, album_id, file_path, file_type, duration, bitrate, sample_rate)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&track.title)
    .bind(track.artist_id)
    .bind(track.album_id)
    .bind(&track.file_path)
    .bind(&track.file_type)
    .bind(track.duration)
    .bind(track.bitrate)
    .bind(track.sample_rate)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| TingError::storage("Failed to retrieve created track"))
}

/// Delete a track. Its lyric and playlist memberships cascade.
pub async fn delete(pool: &SqlitePool, id: TrackId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM tracks WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn get_with_details(pool: &SqlitePool, id: TrackId) -> Result<Option<TrackWithDetails>> {
    let row = sqlx::query(&details_query("WHERE t.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(details_from_row))
}

pub async fn get_all_with_details(pool: &SqlitePool, page: Page) -> Result<Vec<TrackWithDetails>> {
    let rows = sqlx::query(&details_query("ORDER BY t.id LIMIT ? OFFSET ?"))
        .bind(page.limit)
        .bind(page.skip)
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(details_from_row).collect())
}

/// Tracks of a playlist sorted by membership order, ties by insertion
pub async fn get_by_playlist(pool: &SqlitePool, playlist_id: PlaylistId) -> Result<Vec<Track>> {
    let rows = sqlx::query(&format!(
        "SELECT {TRACK_COLUMNS}
         FROM playlist_tracks pt
         INNER JOIN tracks t ON pt.track_id = t.id
         WHERE pt.playlist_id = ?
         ORDER BY pt.sort_order, pt.id"
    ))
    .bind(playlist_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(from_row).collect())
}
