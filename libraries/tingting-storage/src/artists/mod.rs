use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tingting_core::{error::Result, types::*, TingError};

fn from_row(row: &SqliteRow) -> Artist {
    Artist {
        id: row.get("id"),
        name: row.get("name"),
    }
}

pub async fn get_all(pool: &SqlitePool, page: Page) -> Result<Vec<Artist>> {
    let rows = sqlx::query("SELECT id, name FROM artists ORDER BY id LIMIT ? OFFSET ?")
        .bind(page.limit)
        .bind(page.skip)
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(from_row).collect())
}

pub async fn get_by_id(pool: &SqlitePool, id: ArtistId) -> Result<Option<Artist>> {
    let row = sqlx::query("SELECT id, name FROM artists WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(from_row))
}

/// Exact, case-sensitive lookup
pub async fn find_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Artist>> {
    let row = sqlx::query("SELECT id, name FROM artists WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(from_row))
}

pub async fn create(pool: &SqlitePool, name: &str) -> Result<Artist> {
    let result = sqlx::query("INSERT INTO artists (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await?;

    let id = result.last_insert_rowid();

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| TingError::storage("Failed to retrieve created artist"))
}

/// Look the artist up by name, creating it on a miss
///
/// The insert ignores a name conflict, so a row created between the lookup
/// and the insert is picked up by the second lookup instead of failing.
pub async fn find_or_create(pool: &SqlitePool, name: &str) -> Result<Artist> {
    if let Some(artist) = find_by_name(pool, name).await? {
        return Ok(artist);
    }

    sqlx::query("INSERT INTO artists (name) VALUES (?) ON CONFLICT(name) DO NOTHING")
        .bind(name)
        .execute(pool)
        .await?;

    find_by_name(pool, name)
        .await?
        .ok_or_else(|| TingError::storage(format!("Failed to create artist {name}")))
}
