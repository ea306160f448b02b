use std::sync::Arc;

use crate::config::AppConfig;

/// Shared state of the UI host. Cheap to clone into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self { config: Arc::new(config) }
    }
}
