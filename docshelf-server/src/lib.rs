//! # Docshelf Server
//!
//! HTTP front of the library-management service: member invitation, removal,
//! status and role changes, per-user library placement and share-link
//! management, all under `/api/v1`.
//!
//! ## Architecture
//!
//! The server is built on Axum and uses:
//! - PostgreSQL (via `docshelf-core`) for persistent storage
//! - HMAC-signed bearer tokens issued by the surrounding identity service
//! - Layered middleware: token auth, then library or share resolution, then
//!   the per-operation permission check inside each handler

pub mod auth;
pub mod health;
pub mod infra;
pub mod library;
pub mod routes;

pub use infra::app_state::AppState;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

pub fn create_app(state: AppState) -> Router {
    let versioned_api = routes::create_api_router(state.clone());

    // Build CORS layer (permissive in dev, allow-list in prod)
    let cors_layer = if state.config().dev_mode {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config()
            .cors_allowed_origins
            .iter()
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();
        let allow_origin = if origins.is_empty() {
            AllowOrigin::any()
        } else {
            AllowOrigin::list(origins)
        };

        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
    };

    Router::new()
        .route("/health", get(health::health_handler))
        .merge(versioned_api)
        // Outer to inner: tracing, then CORS
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer),
        )
        .with_state(state)
}
