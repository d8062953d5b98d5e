use crate::{handlers, AppState};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn create_router(state: AppState) -> Router {
    let max_upload = state.config.upload.max_bytes;

    Router::new()
        // Landing page and health check
        .route("/", get(handlers::welcome))
        .route("/health", get(handlers::health))
        // Risk pipeline
        .route("/predict", post(handlers::predict))
        .layer(DefaultBodyLimit::max(max_upload))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(TraceLayer::new_for_http())
}
