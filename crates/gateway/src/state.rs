//! Application state for dependency injection.

use std::sync::Arc;

use user_service_lib::{UserManager, UserService};

use crate::config::GatewayConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    pub config: GatewayConfig,
}

impl AppState {
    /// Create new app state.
    pub fn new(user_service: Arc<dyn UserService>, config: GatewayConfig) -> Self {
        Self {
            user_service,
            config,
        }
    }

    /// Create app state owning a fresh, empty in-memory user store.
    pub fn in_memory(config: GatewayConfig) -> Self {
        Self::new(Arc::new(UserManager::in_memory()), config)
    }
}
