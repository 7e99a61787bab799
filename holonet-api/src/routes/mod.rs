//! HTTP routes
//!
//! Entity list/lookup routes for every catalog entity type, the character
//! chat route, health checks, and CORS for browser-based clients.

pub mod catalog;
pub mod chat;
pub mod health;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::state::AppState;

/// Create the complete gateway router.
///
/// Routes:
/// - `GET /{entity}` - filtered, re-paginated list (characters, films,
///   starships, planets)
/// - `GET /{entity}/{id}` - single record lookup
/// - `POST /characters/{id}/chat` - in-character chat completion
/// - `GET /health/*` - liveness and readiness probes (public)
pub fn create_api_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config);

    Router::new()
        .route("/:entity", get(catalog::list))
        .route("/:entity/:id", get(catalog::get_by_id))
        .route("/characters/:id/chat", post(chat::chat))
        .nest("/health", health::create_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Build the CORS layer from configuration.
///
/// Empty origin list means development mode: allow all origins.
fn build_cors_layer(config: &GatewayConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    if config.cors_origins.is_empty() {
        tracing::info!("CORS: development mode - allowing all origins");
        cors.allow_origin(Any)
    } else {
        tracing::info!(origins = ?config.cors_origins, "CORS: allowing configured origins");
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}
