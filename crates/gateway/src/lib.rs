//! User Management API Library
//!
//! This crate provides the HTTP REST API over the user service: routing,
//! request validation, the response envelope and OpenAPI documentation.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;

use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::GatewayConfig;
use crate::routes::{cors_layer, create_router};
use crate::state::AppState;

/// Run the HTTP server until a shutdown signal arrives.
pub async fn run_server(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    let cors = cors_layer(&config.cors)?;
    let addr = config.service.addr();

    // The store lives exactly as long as the server
    let state = AppState::in_memory(config.clone());

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(&addr).await?;
    let local = listener.local_addr()?;

    info!("{} is running on {}", config.service.service_name, local);
    info!("API documentation available at http://{}/swagger-ui", local);
    info!("Health check available at http://{}/health", local);
    info!("Environment: {}", config.service.environment);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server closed");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("SIGINT received: closing HTTP server"),
        _ = terminate => info!("SIGTERM received: closing HTTP server"),
    }
}
