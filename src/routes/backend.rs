use axum::{
    http::{StatusCode, Uri},
    response::IntoResponse,
    Json,
};

/// Path prefix of a same-origin `ui.api_base` (`/api`). Absolute backend
/// URLs and `/` reserve nothing.
pub fn reserved_prefix(api_base: &str) -> Option<String> {
    let base = api_base.trim().trim_end_matches('/');
    if base.starts_with('/') && base.len() > 1 {
        Some(base.to_string())
    } else {
        None
    }
}

// API calls that reach this host: the backend is mounted by a reverse proxy
// in front of it, or `ui.api_base` points elsewhere. Never the UI shell.
pub async fn not_served(uri: Uri) -> impl IntoResponse {
    tracing::warn!(%uri, "API request reached the UI host");
    let body = serde_json::json!({
        "detail": "The API backend is not reachable through this host",
    });
    (StatusCode::BAD_GATEWAY, Json(body))
}
