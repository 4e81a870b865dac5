/// HTTP router
use crate::{api, state::AppState};
use axum::{
    routing::{get, post},
    Router,
};
use std::path::Path;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, TraceLayer},
};

/// API routes under `/api`, plus the web UI when `server.web_dir` is set
pub fn create_router(app_state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(api::health::health))
        // Scanning
        .route("/scan", post(api::scan::trigger_scan))
        .route("/scan/status", get(api::scan::scan_status))
        // Browse
        .route("/artists", get(api::artists::list_artists))
        .route("/artists/:id", get(api::artists::get_artist))
        .route("/albums", get(api::albums::list_albums))
        .route("/albums/:id", get(api::albums::get_album))
        // Tracks
        .route("/tracks", get(api::tracks::list_tracks))
        .route(
            "/tracks/:id",
            get(api::tracks::get_track).delete(api::tracks::delete_track),
        )
        .route("/tracks/:id/stream", get(api::stream::stream_track))
        .route("/tracks/:id/cover", get(api::cover::get_cover))
        .route(
            "/tracks/:id/lyric",
            get(api::lyrics::get_lyric)
                .post(api::lyrics::put_lyric)
                .delete(api::lyrics::delete_lyric),
        )
        // Playlists
        .route(
            "/playlists",
            get(api::playlists::list_playlists).post(api::playlists::create_playlist),
        )
        .route(
            "/playlists/:id",
            get(api::playlists::get_playlist)
                .put(api::playlists::update_playlist)
                .delete(api::playlists::delete_playlist),
        )
        .route(
            "/playlists/:id/tracks",
            post(api::playlists::add_track_to_playlist),
        )
        .route(
            "/playlists/:id/tracks/:track_id",
            axum::routing::delete(api::playlists::remove_track_from_playlist),
        );

    let mut router = Router::new().nest("/api", api_routes);

    // Static web UI (SPA with fallback to index.html)
    if let Some(web_dir) = app_state.config.server.web_dir.clone() {
        router = router.fallback_service(spa_service(&web_dir));
    }

    router
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

fn spa_service(web_dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(web_dir).fallback(ServeFile::new(web_dir.join("index.html")))
}
