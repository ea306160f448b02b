//! Records and DTOs exchanged with the MyCloud REST backend.
//!
//! The backend is not schema-enforced from the client's point of view, so
//! every field except the id is optional and decoded leniently: numbers may
//! arrive as strings, strings may be missing or null, unknown fields are
//! ignored. Fallbacks between fields are expressed as methods instead of
//! ad hoc `a || b` chains at the call sites.

use serde::{Deserialize, Deserializer, Serialize};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Owner reference embedded in admin file listings.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct OwnerRef {
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub username: Option<String>,
}

/// A stored file as returned by `/files/` and `/admin/files/`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct FileRecord {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: i64,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub original_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub size: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub uploaded_at: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::owner")]
    pub user: Option<OwnerRef>,
}

impl FileRecord {
    /// Upload timestamp: `uploaded_at`, then `created_at`.
    pub fn timestamp(&self) -> Option<&str> {
        non_empty(self.uploaded_at.as_deref()).or_else(|| non_empty(self.created_at.as_deref()))
    }

    pub fn name(&self) -> &str {
        self.original_name.as_deref().unwrap_or("")
    }

    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Size in bytes, missing treated as 0.
    pub fn size_bytes(&self) -> i64 {
        self.size.unwrap_or(0)
    }

    pub fn owner_id(&self) -> Option<i64> {
        self.user.as_ref().and_then(|u| u.id)
    }

    /// Owner username, empty when the listing carries no owner.
    pub fn owner_username(&self) -> &str {
        self.user.as_ref().and_then(|u| u.username.as_deref()).unwrap_or("")
    }
}

/// A user account as returned by `/auth/me/` and `/admin/users/`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct UserRecord {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: i64,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_staff: bool,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub date_joined: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub files_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub files_total_size: Option<i64>,
}

impl UserRecord {
    pub fn name(&self) -> &str {
        self.username.as_deref().unwrap_or("")
    }

    pub fn email_text(&self) -> &str {
        self.email.as_deref().unwrap_or("")
    }

    pub fn file_count(&self) -> i64 {
        self.files_count.unwrap_or(0)
    }

    pub fn total_size(&self) -> i64 {
        self.files_total_size.unwrap_or(0)
    }
}

/// Records addressable by their backend id (used for in-place list updates).
pub trait Identified {
    fn record_id(&self) -> i64;
}

impl Identified for FileRecord {
    fn record_id(&self) -> i64 {
        self.id
    }
}

impl Identified for UserRecord {
    fn record_id(&self) -> i64 {
        self.id
    }
}

/// Response of `POST /token/`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct TokenPair {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Response of `POST /links/`. `url` is usually relative to the site origin.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct ShareLink {
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub token: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub expires_at: Option<String>,
}

impl ShareLink {
    /// Absolute link for `origin` (e.g. `https://cloud.example`). Absolute
    /// urls pass through; a missing url falls back to the origin itself.
    pub fn absolute_url(&self, origin: &str) -> String {
        let origin = origin.trim_end_matches('/');
        match self.url.as_deref().map(str::trim) {
            Some(u) if u.starts_with("http://") || u.starts_with("https://") => u.to_string(),
            Some(u) if u.starts_with('/') => format!("{}{}", origin, u),
            Some(u) if !u.is_empty() => format!("{}/{}", origin, u),
            _ => origin.to_string(),
        }
    }
}

/// Response of the admin temporary-password action.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct TempPassword {
    #[serde(default, alias = "password", deserialize_with = "lenient::opt_string")]
    pub temp_password: Option<String>,
}

/// Body of `POST /auth/register/`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Contact address shown when nothing is configured.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";

/// Settings the host hands to the UI at `/app-config.json`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RuntimeConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_admin_email")]
    pub admin_email: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self { api_base: default_api_base(), admin_email: default_admin_email() }
    }
}

fn default_api_base() -> String {
    crate::api::DEFAULT_API_BASE.to_string()
}

fn default_admin_email() -> String {
    DEFAULT_ADMIN_EMAIL.to_string()
}

/// Accepts a bare array or a pagination envelope `{ "results": [...] }`.
///
/// Anything else yields an empty list. Elements that are not objects are
/// skipped with a warning; object elements always decode because every
/// record field is optional.
pub fn decode_list<T: DeserializeOwned>(value: Value) -> Vec<T> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(items)) => items,
            _ => {
                tracing::warn!("list response without a results array; treating as empty");
                return Vec::new();
            }
        },
        other => {
            tracing::warn!("unexpected list response shape: {}", type_name(&other));
            return Vec::new();
        }
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<T>(item) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("skipping malformed record: {}", e);
                None
            }
        })
        .collect()
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.trim().is_empty())
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Deserializers that degrade shape violations to defaults instead of failing.
mod lenient {
    use super::*;

    fn as_i64(v: &Value) -> Option<i64> {
        match v {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>().ok().or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
            }
            _ => None,
        }
    }

    pub fn id<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
        Ok(as_i64(&Value::deserialize(d)?).unwrap_or(0))
    }

    pub fn opt_i64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        Ok(as_i64(&Value::deserialize(d)?))
    }

    pub fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
    }

    pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Bool(b) => b,
            Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
            Value::String(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"),
            _ => false,
        })
    }

    pub fn owner<'de, D: Deserializer<'de>>(d: D) -> Result<Option<OwnerRef>, D::Error> {
        Ok(match Value::deserialize(d)? {
            v @ Value::Object(_) => serde_json::from_value(v).ok(),
            // Some serializers send only the owner's primary key.
            v @ (Value::Number(_) | Value::String(_)) => {
                as_i64(&v).map(|id| OwnerRef { id: Some(id), username: None })
            }
            _ => None,
        })
    }
}
