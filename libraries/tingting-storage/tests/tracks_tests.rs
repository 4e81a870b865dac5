//! Integration tests for the tracks vertical slice


use test_helpers::*;
use tingting_core::types::*;

#[tokio::test]
async fn test_create_and_find_track_by_path() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let track = create_test_track(pool, "Song", "/music/song.mp3").await;

    assert_eq!(track.title, "Song");
    assert_eq!(track.file_type, "mp3");
    assert_eq!(track.duration, 180.0);
    assert_eq!(track.bitrate, Some(320_000));

    let found = tingting_storage::tracks::find_by_path(pool, "/music/song.mp3")
        .await
        .unwrap()
        .expect("track should be found by path");
    assert_eq!(found, track);

    let missing = tingting_storage::tracks::find_by_path(pool, "/music/SONG.mp3")
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_file_path_is_unique() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    create_test_track(pool, "Song", "/music/song.mp3").await;

    let duplicate = tingting_storage::tracks::create(
        pool,
        CreateTrack {
            title: "Other".to_string(),
            artist_id: None,
            album_id: None,
            file_path: "/music/song.mp3".to_string(),
            file_type: "mp3".to_string(),
            duration: 0.0,
            bitrate: None,
            sample_rate: None,
        },
    )
    .await;

    assert!(duplicate.is_err());
    assert_eq!(count_rows(pool, "tracks").await, 1);
}

#[tokio::test]
async fn test_track_with_details_resolves_relations() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let artist = tingting_storage::artists::create(pool, "Artist A").await.unwrap();
    let album = tingting_storage::albums::create(pool, "Album X", Some(artist.id))
        .await
        .unwrap();

    let track = tingting_storage::tracks::create(
        pool,
        CreateTrack {
            title: "Test".to_string(),
            artist_id: Some(artist.id),
            album_id: Some(album.id),
            file_path: "/music/song.flac".to_string(),
            file_type: "flac".to_string(),
            duration: 241.5,
            bitrate: None,
            sample_rate: Some(48_000),
        },
    )
    .await
    .unwrap();

    tingting_storage::lyrics::upsert(pool, track.id, "[00:01.00]hello")
        .await
        .unwrap();

    let details = tingting_storage::tracks::get_with_details(pool, track.id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(details.track, track);
    assert_eq!(details.artist, Some(artist));
    assert_eq!(details.album, Some(album));
    assert_eq!(
        details.lyric.map(|l| l.content),
        Some("[00:01.00]hello".to_string())
    );
}

#[tokio::test]
async fn test_track_without_relations_has_empty_details() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    create_test_track(pool, "Bare", "/music/bare.mp3").await;

    let all = tingting_storage::tracks::get_all_with_details(pool, Page::default())
        .await
        .unwrap();

    assert_eq!(all.len(), 1);
    assert!(all[0].artist.is_none());
    assert!(all[0].album.is_none());
    assert!(all[0].lyric.is_none());
}

#[tokio::test]
async fn test_delete_track_cascades_lyric_and_memberships() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let track = create_test_track(pool, "Doomed", "/music/doomed.mp3").await;
    let playlist = create_test_playlist(pool, "Mix").await;

    tingting_storage::lyrics::upsert(pool, track.id, "la la")
        .await
        .unwrap();
    tingting_storage::playlists::add_track(pool, playlist.id, track.id, 0)
        .await
        .unwrap();

    assert!(tingting_storage::tracks::delete(pool, track.id).await.unwrap());
    assert!(!tingting_storage::tracks::delete(pool, track.id).await.unwrap());

    assert_eq!(count_rows(pool, "lyrics").await, 0);
    assert_eq!(count_rows(pool, "playlist_tracks").await, 0);
    assert_eq!(count_rows(pool, "playlists").await, 1);
}

#[tokio::test]
async fn test_get_tracks_respects_page() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    for i in 0..5 {
        create_test_track(pool, &format!("Track {i}"), &format!("/music/{i}.mp3")).await;
    }

    let page = tingting_storage::tracks::get_all(pool, Page::new(3, 10))
        .await
        .unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].title, "Track 3");

    let empty = tingting_storage::tracks::get_all(pool, Page::new(0, 0))
        .await
        .unwrap();
    assert!(empty.is_empty());
}
