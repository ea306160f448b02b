//! Client-side error taxonomy and the user-facing notices derived from it.
//!
//! Every failure is caught at the user action that triggered it and turned
//! into a [`Notice`]; nothing propagates further. Read failures become a
//! static alert, failures of mutating actions a short-lived toast. Clipboard
//! failures never reach this module (they degrade to a manual-copy prompt).

use serde_json::Value;
use thiserror::Error;

/// How long a toast stays on screen.
pub const TOAST_TTL_MS: u32 = 1600;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),
    #[error("not authenticated")]
    Unauthorized,
    #[error("access denied")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("HTTP {status}: {detail}")]
    Http { status: u16, detail: String },
    /// The response body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Map a non-2xx response to an error, keeping the backend's `detail`
    /// message when the body carries one.
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        match status {
            401 => ClientError::Unauthorized,
            403 => ClientError::Forbidden,
            404 => ClientError::NotFound,
            _ => ClientError::Http { status, detail: detail_from_body(body) },
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ClientError::Unauthorized | ClientError::Forbidden)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

/// Best-effort extraction of a human message from an error body:
/// `{"detail": "..."}`, then the first field error (`{"email": ["..."]}`),
/// then the raw text.
pub fn detail_from_body(body: &[u8]) -> String {
    if let Ok(v) = serde_json::from_slice::<Value>(body) {
        if let Some(d) = v.get("detail").and_then(Value::as_str) {
            return d.to_string();
        }
        if let Some(obj) = v.as_object() {
            for (field, val) in obj {
                let msg = match val {
                    Value::String(s) => Some(s.clone()),
                    Value::Array(items) => items.iter().find_map(|i| i.as_str().map(str::to_string)),
                    _ => None,
                };
                if let Some(msg) = msg {
                    return format!("{}: {}", field, msg);
                }
            }
        }
    }
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        "HTTP error".to_string()
    } else {
        text.chars().take(200).collect()
    }
}

/// What the user was doing when the failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Read,
    Mutation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Static, stays until the view reloads.
    Alert,
    /// Auto-dismissing.
    Toast { ttl_ms: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn toast(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Toast { ttl_ms: TOAST_TTL_MS }, message: message.into() }
    }

    pub fn alert(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Alert, message: message.into() }
    }

    /// Notice for a failed action: `context` is the short user-facing
    /// summary ("Download failed"); auth failures get a sign-in hint.
    pub fn for_failure(action: ActionKind, context: &str, err: &ClientError) -> Self {
        tracing::warn!(?action, "{}: {}", context, err);
        let message = match err {
            ClientError::Unauthorized => format!("{}: please sign in", context),
            ClientError::Forbidden => format!("{}: access denied", context),
            ClientError::Http { detail, .. } => format!("{}: {}", context, detail),
            _ => context.to_string(),
        };
        match action {
            ActionKind::Read => Notice::alert(message),
            ActionKind::Mutation => Notice::toast(message),
        }
    }
}
