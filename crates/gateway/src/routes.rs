//! Route configuration.

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::{AppError, CorsConfig};

use crate::handlers::{health_check, user_routes};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/users", user_routes())
        .fallback(route_not_found)
        .with_state(state)
}

/// Fallback for unmatched paths.
async fn route_not_found() -> AppError {
    AppError::not_found("Route not found")
}

/// Build the CORS layer for the configured origin.
pub fn cors_layer(config: &CorsConfig) -> Result<CorsLayer, AppError> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    if config.allows_any() {
        return Ok(layer.allow_origin(Any));
    }

    let origin = config
        .origin
        .parse::<HeaderValue>()
        .map_err(|e| AppError::internal(format!("Invalid CORS_ORIGIN {:?}: {}", config.origin, e)))?;

    Ok(layer.allow_origin(origin))
}
