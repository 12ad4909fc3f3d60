//! Router assembly: endpoints, auth, CORS, and request tracing.

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::api;
use crate::app_state::SharedState;
use crate::auth::AuthLayer;
use crate::config::ServerConfig;

/// Build the complete router. The auth layer is attached only when a token
/// is configured; local unauthenticated use stays possible.
pub fn create_router(state: SharedState, config: &ServerConfig) -> Router {
    let mut router = Router::new()
        .route("/health", get(health))
        .route("/api/generate", post(api::generate::generate))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins));

    if let Some(token) = &config.auth_token {
        router = router.layer(AuthLayer::new(token.clone()));
    }

    router
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|origin| origin == "*") {
        return CorsLayer::new().allow_origin(Any).allow_headers(Any).allow_methods(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_headers(Any)
        .allow_methods(Any)
}

/// Health probe. Unauthenticated by design of the auth layer.
async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}
