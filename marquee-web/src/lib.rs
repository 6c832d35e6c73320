//! marquee-web library - server-rendered listings and booking directory
//!
//! Exposes the full HTTP surface: venue/artist directories, partial-name
//! search, detail pages with upcoming/past show history, and
//! create/edit/delete web forms.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod error;
pub mod forms;
pub mod views;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/", get(api::home))
        .route("/venues", get(api::list_venues))
        .route("/venues/search", post(api::search_venues))
        .route("/venues/create", get(api::create_venue_form).post(api::create_venue))
        .route("/venues/:id", get(api::show_venue).delete(api::delete_venue))
        .route("/venues/:id/edit", get(api::edit_venue_form).post(api::update_venue))
        .route("/artists", get(api::list_artists))
        .route("/artists/search", post(api::search_artists))
        .route("/artists/create", get(api::create_artist_form).post(api::create_artist))
        .route("/artists/:id", get(api::show_artist))
        .route("/artists/:id/edit", get(api::edit_artist_form).post(api::update_artist))
        .route("/shows", get(api::list_shows))
        .route("/shows/create", get(api::create_show_form).post(api::create_show))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
