use std::sync::Arc;

use gradebook_db::store::StudentStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Record store chosen at startup.
    pub store: Arc<dyn StudentStore>,
    /// Server configuration (body limit for the request logger, health info).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn StudentStore>, config: ServerConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}
