use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tingting_core::{error::Result, types::*, TingError};

use crate::tracks;

/// Name of the system playlist holding favorites
pub const FAVORITES_NAME: &str = "Favorites";
/// Name of the system playlist holding recently played tracks
pub const RECENT_NAME: &str = "Recently Played";
/// Name of the system playlist covering the whole music directory
pub const ALL_MUSIC_NAME: &str = "All Music";

fn from_row(row: &SqliteRow) -> Result<Playlist> {
    let playlist_type: String = row.get("type");

    Ok(Playlist {
        id: row.get("id"),
        name: row.get("name"),
        playlist_type: playlist_type.parse()?,
        music_dir: row.get("music_dir"),
    })
}

fn membership_from_row(row: &SqliteRow) -> PlaylistTrack {
    PlaylistTrack {
        id: row.get("id"),
        playlist_id: row.get("playlist_id"),
        track_id: row.get("track_id"),
        order: row.get("sort_order"),
    }
}

pub async fn get_all(pool: &SqlitePool, page: Page) -> Result<Vec<Playlist>> {
    let rows = sqlx::query(
        "SELECT id, name, type, music_dir
         FROM playlists
         ORDER BY id
         LIMIT ? OFFSET ?",
    )
    .bind(page.limit)
    .bind(page.skip)
    .fetch_all(pool)
    .await?;

    rows.iter().map(from_row).collect()
}

pub async fn get_by_id(pool: &SqlitePool, id: PlaylistId) -> Result<Option<Playlist>> {
    let row = sqlx::query("SELECT id, name, type, music_dir FROM playlists WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(from_row).transpose()
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Playlist>> {
    let row = sqlx::query(
        "SELECT id, name, type, music_dir FROM playlists WHERE name = ? ORDER BY id LIMIT 1",
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(from_row).transpose()
}

pub async fn find_by_name_and_type(
    pool: &SqlitePool,
    name: &str,
    playlist_type: PlaylistType,
) -> Result<Option<Playlist>> {
    let row = sqlx::query(
        "SELECT id, name, type, music_dir
         FROM playlists
         WHERE name = ? AND type = ?
         ORDER BY id
         LIMIT 1",
    )
    .bind(name)
    .bind(playlist_type.as_str())
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(from_row).transpose()
}

pub async fn get_with_tracks(pool: &SqlitePool, id: PlaylistId) -> Result<Option<PlaylistWithTracks>> {
    let Some(playlist) = get_by_id(pool, id).await? else {
        return Ok(None);
    };

    let tracks = tracks::get_by_playlist(pool, id).await?;

    Ok(Some(PlaylistWithTracks { playlist, tracks }))
}

pub async fn create(pool: &SqlitePool, playlist: CreatePlaylist) -> Result<Playlist> {
    let result = sqlx::query("INSERT INTO playlists (name, type, music_dir) VALUES (?, ?, ?)")
        .bind(&playlist.name)
        .bind(playlist.playlist_type.as_str())
        .bind(&playlist.music_dir)
        .execute(pool)
        .await?;

    let id = result.last_insert_rowid();

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| TingError::storage("Failed to retrieve created playlist"))
}

pub async fn update(pool: &SqlitePool, id: PlaylistId, name: &str) -> Result<Option<Playlist>> {
    let result = sqlx::query("UPDATE playlists SET name = ? WHERE id = ?")
        .bind(name)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_by_id(pool, id).await
}

/// Delete a playlist. Memberships cascade; tracks are untouched.
pub async fn delete(pool: &SqlitePool, id: PlaylistId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM playlists WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Create the three system playlists when they are missing
///
/// Favorites and recent are matched by name and type. The all-music playlist
/// is matched by name alone and carries `music_dir`.
pub async fn ensure_defaults(pool: &SqlitePool, music_dir: &str) -> Result<()> {
    for (name, playlist_type) in [
        (FAVORITES_NAME, PlaylistType::Favorite),
        (RECENT_NAME, PlaylistType::Recent),
    ] {
        if find_by_name_and_type(pool, name, playlist_type).await?.is_none() {
            tracing::info!("Creating default playlist '{}'", name);
            create(
                pool,
                CreatePlaylist {
                    name: name.to_string(),
                    playlist_type,
                    music_dir: None,
                },
            )
            .await?;
        }
    }

    if find_by_name(pool, ALL_MUSIC_NAME).await?.is_none() {
        tracing::info!("Creating default playlist '{}'", ALL_MUSIC_NAME);
        create(
            pool,
            CreatePlaylist {
                name: ALL_MUSIC_NAME.to_string(),
                playlist_type: PlaylistType::All,
                music_dir: Some(music_dir.to_string()),
            },
        )
        .await?;
    }

    Ok(())
}

/// Insert a membership row. Adding a track already in the playlist adds it again.
pub async fn add_track(
    pool: &SqlitePool,
    playlist_id: PlaylistId,
    track_id: TrackId,
    order: i64,
) -> Result<PlaylistTrack> {
    if get_by_id(pool, playlist_id).await?.is_none() {
        return Err(TingError::not_found("Playlist", playlist_id));
    }
    if tracks::get_by_id(pool, track_id).await?.is_none() {
        return Err(TingError::not_found("Track", track_id));
    }

    let result = sqlx::query(
        "INSERT INTO playlist_tracks (playlist_id, track_id, sort_order) VALUES (?, ?, ?)",
    )
    .bind(playlist_id)
    .bind(track_id)
    .bind(order)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();

    let row = sqlx::query(
        "SELECT id, playlist_id, track_id, sort_order FROM playlist_tracks WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref()
        .map(membership_from_row)
        .ok_or_else(|| TingError::storage("Failed to retrieve playlist membership"))
}

/// Remove every membership of the track in the playlist
pub async fn remove_track(
    pool: &SqlitePool,
    playlist_id: PlaylistId,
    track_id: TrackId,
) -> Result<bool> {
    let result = sqlx::query("DELETE FROM playlist_tracks WHERE playlist_id = ? AND track_id = ?")
        .bind(playlist_id)
        .bind(track_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
