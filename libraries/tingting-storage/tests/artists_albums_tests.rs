//! Integration tests for the artists and albums vertical slices


use test_helpers::*;
use tingting_core::types::*;

#[tokio::test]
async fn test_find_or_create_artist_is_idempotent() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let first = tingting_storage::artists::find_or_create(pool, "Artist A")
        .await
        .unwrap();
    let second = tingting_storage::artists::find_or_create(pool, "Artist A")
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(count_rows(pool, "artists").await, 1);
}

#[tokio::test]
async fn test_artist_lookup_is_case_sensitive() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let lower = tingting_storage::artists::find_or_create(pool, "artist a")
        .await
        .unwrap();
    let upper = tingting_storage::artists::find_or_create(pool, "Artist A")
        .await
        .unwrap();

    assert_ne!(lower.id, upper.id);
    assert_eq!(count_rows(pool, "artists").await, 2);
}

#[tokio::test]
async fn test_create_artist_rejects_duplicate_name() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    tingting_storage::artists::create(pool, "Solo").await.unwrap();
    let duplicate = tingting_storage::artists::create(pool, "Solo").await;

    assert!(duplicate.is_err());
}

#[tokio::test]
async fn test_get_artists_paginates_by_id() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    for name in ["A", "B", "C", "D"] {
        tingting_storage::artists::create(pool, name).await.unwrap();
    }

    let page = tingting_storage::artists::get_all(pool, Page::new(1, 2))
        .await
        .unwrap();

    let names: Vec<_> = page.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["B", "C"]);
}

#[tokio::test]
async fn test_create_album_always_inserts() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let artist = tingting_storage::artists::create(pool, "Artist A").await.unwrap();

    let first = tingting_storage::albums::create(pool, "Album X", Some(artist.id))
        .await
        .unwrap();
    let second = tingting_storage::albums::create(pool, "Album X", Some(artist.id))
        .await
        .unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(count_rows(pool, "albums").await, 2);
}

#[tokio::test]
async fn test_find_album_matches_title_and_artist() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let a = tingting_storage::artists::create(pool, "A").await.unwrap();
    let b = tingting_storage::artists::create(pool, "B").await.unwrap();
    let album = tingting_storage::albums::create(pool, "Shared", Some(a.id))
        .await
        .unwrap();

    let found = tingting_storage::albums::find(pool, "Shared", Some(a.id))
        .await
        .unwrap();
    assert_eq!(found.map(|al| al.id), Some(album.id));

    let other_artist = tingting_storage::albums::find(pool, "Shared", Some(b.id))
        .await
        .unwrap();
    assert!(other_artist.is_none());
}

#[tokio::test]
async fn test_find_album_without_artist_matches_null() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let album = tingting_storage::albums::create(pool, "Loose Tracks", None)
        .await
        .unwrap();

    let found = tingting_storage::albums::find(pool, "Loose Tracks", None)
        .await
        .unwrap()
        .expect("album with NULL artist should match");

    assert_eq!(found.id, album.id);
    assert_eq!(found.artist_id, None);
}

#[tokio::test]
async fn test_set_album_cover() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let album = tingting_storage::albums::create(pool, "Covered", None)
        .await
        .unwrap();
    assert_eq!(album.cover_path, None);

    let updated = tingting_storage::albums::set_cover(pool, album.id, Some("/covers/x.jpg"))
        .await
        .unwrap();
    assert!(updated);

    let album = tingting_storage::albums::get_by_id(pool, album.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(album.cover_path.as_deref(), Some("/covers/x.jpg"));

    assert!(!tingting_storage::albums::set_cover(pool, 9999, None).await.unwrap());
}
