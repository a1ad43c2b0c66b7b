//! Health check handlers.

use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use common::ApiResponse;

use crate::state::AppState;

/// Health check payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub timestamp: DateTime<Utc>,
    pub environment: String,
}

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Server is healthy", body = HealthStatus)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> ApiResponse<HealthStatus> {
    ApiResponse::with_message(
        HealthStatus {
            timestamp: Utc::now(),
            environment: state.config.service.environment.clone(),
        },
        "Server is healthy",
    )
}
