use axum::{extract::State, response::IntoResponse, Json};

use crate::state::AppState;
use crate::types::RuntimeConfig;

/// Runtime settings for the web UI. Read once at startup by the client.
pub async fn app_config(State(state): State<AppState>) -> impl IntoResponse {
    let ui = &state.config.ui;
    Json(RuntimeConfig { api_base: ui.api_base.clone(), admin_email: ui.admin_email.clone() })
}
