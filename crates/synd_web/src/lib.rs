use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod handlers;
pub mod state;

pub use state::{AppState, PublishPolicy};

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/approved-content", get(handlers::approved_content))
        .route(
            "/api/save-approved-content",
            post(handlers::save_approved_content),
        )
        .route(
            "/api/publish-approved-content",
            post(handlers::publish_approved_content),
        )
        .route("/api/refresh-content", post(handlers::refresh_content))
        .route("/api/clear-content", post(handlers::clear_content))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use crate::{AppState, PublishPolicy};
    pub use synd_core::{Article, Error, Result};
}
