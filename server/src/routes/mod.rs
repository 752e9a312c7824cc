// Route handlers and router assembly

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

use crate::auth;
use crate::state::AppState;

pub mod backup;
pub mod calendar;
pub mod events;
pub mod settings;
pub mod stats;

/// Uploaded restore archives are size-bounded
const MAX_ARCHIVE_BYTES: usize = 100 * 1024 * 1024;

/// Logo upload forms: 5 MB file plus text fields and multipart overhead
const MAX_FORM_BYTES: usize = 8 * 1024 * 1024;

pub fn router(state: AppState) -> Router {
    let uploads_dir = state.assets.root().to_path_buf();
    let public_dir = state.config.public_dir.clone();
    let index = public_dir.join("index.html");

    Router::new()
        // Auth
        .route("/api/admin/login", post(auth::login))
        .route("/api/admin/logout", post(auth::logout))
        .route("/api/admin/check", get(auth::check))
        // Settings
        .route(
            "/api/settings",
            get(settings::get_settings).put(settings::update_settings),
        )
        // Events
        .route(
            "/api/events",
            get(events::list_events).post(events::create_event),
        )
        .route(
            "/api/events/{id}",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        // Stats and calendar
        .route("/api/stats", get(stats::get_stats))
        .route("/api/calendar.ics", get(calendar::calendar_feed))
        // Backup and restore
        .route("/api/admin/backup", get(backup::export_snapshot))
        .route("/api/admin/restore", post(backup::restore_snapshot))
        .route("/api/admin/backup/full", get(backup::export_archive))
        .route(
            "/api/admin/restore/full",
            post(backup::restore_archive).layer(DefaultBodyLimit::max(MAX_ARCHIVE_BYTES)),
        )
        .layer(DefaultBodyLimit::max(MAX_FORM_BYTES))
        // Uploaded logos and the dashboard bundle
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .fallback_service(ServeDir::new(&public_dir).not_found_service(ServeFile::new(index)))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
