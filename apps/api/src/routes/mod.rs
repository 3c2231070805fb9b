pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::analysis::handlers;
use crate::state::AppState;
use crate::storage::UPLOADS_ROUTE;

pub fn build_router(state: AppState) -> Router {
    let uploads = ServeDir::new(state.uploads.dir());
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/upload", post(handlers::handle_upload))
        .route("/api/v1/skills", get(handlers::handle_list_skills))
        .nest_service(UPLOADS_ROUTE, uploads)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
