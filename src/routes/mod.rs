//! HTTP surface of the UI host.
//!
//! - `health`: liveness and build info
//! - `app_config`: runtime settings consumed by the web UI
//! - `backend`: a 502 under a same-origin `ui.api_base`, so API calls that
//!   bypass the backend proxy fail instead of receiving the UI shell
//!
//! Everything else is the compiled UI bundle, with `index.html` answering
//! unknown paths so client-side routes survive a reload.

pub mod app_config;
pub mod backend;
pub mod health;

use std::path::{Path, PathBuf};

use axum::middleware::from_fn_with_state;
use axum::{
    routing::{any, get},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::middleware::security_headers::security_headers_middleware;
use crate::state::AppState;

/// UI directory: `<exe_dir>/<dir>` when it holds an `index.html`, otherwise
/// `dir` relative to the working directory.
pub fn resolve_ui_dir(dir: &str) -> PathBuf {
    let configured = Path::new(dir);
    if configured.is_absolute() {
        return configured.to_path_buf();
    }
    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|d| d.join(configured)));
    match beside_exe {
        Some(candidate) if candidate.join("index.html").is_file() => candidate,
        _ => configured.to_path_buf(),
    }
}

pub fn router(state: AppState, ui_root: &Path) -> Router {
    let ui_index = ui_root.join("index.html");
    if !ui_index.is_file() {
        tracing::warn!("UI bundle not found at {}; only API routes will answer", ui_root.display());
    }
    let static_ui_service = ServeDir::new(ui_root)
        .append_index_html_on_directories(true)
        .fallback(ServeFile::new(ui_index));

    let cfg_arc = state.config.clone();

    let mut app = Router::new()
        .route("/healthz", get(health::healthz))
        .route("/version", get(health::version))
        .route("/app-config.json", get(app_config::app_config));
    if let Some(prefix) = backend::reserved_prefix(&state.config.ui.api_base) {
        app = app
            .route(&prefix, any(backend::not_served))
            .route(&format!("{}/", prefix), any(backend::not_served))
            .route(&format!("{}/{{*rest}}", prefix), any(backend::not_served));
    }

    app.fallback_service(static_ui_service)
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(from_fn_with_state(cfg_arc, security_headers_middleware))
}
