use std::path::Path;

use serde::{Deserialize, Serialize};

const DEFAULTS: &str = include_str!("../config/default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Where the compiled web UI lives and what it is told at runtime.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    pub dir: String,
    pub api_base: String,
    pub admin_email: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct SecurityConfig {
    pub enable_hsts: Option<bool>,
    pub hsts_max_age: Option<u64>,
    pub hsts_include_subdomains: Option<bool>,
    pub csp: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub ui: UiConfig,
    pub security: Option<SecurityConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        // The embedded defaults are part of the binary; failing to parse them is a build defect.
        match ::config::Config::builder()
            .add_source(::config::File::from_str(DEFAULTS, ::config::FileFormat::Toml))
            .build()
            .and_then(|cfg| cfg.try_deserialize())
        {
            Ok(app_cfg) => app_cfg,
            Err(e) => panic!("Failed to parse default config: {}", e),
        }
    }
}

/// Embedded defaults -> mycloud.toml -> $MYCLOUD_CONFIG -> MYCLOUD__* env.
pub fn load() -> anyhow::Result<AppConfig> {
    // Load .env first (optional)
    let _ = dotenvy::dotenv();
    let custom = std::env::var("MYCLOUD_CONFIG").ok();
    load_with(custom.as_deref().map(Path::new))
}

/// Same layering as [`load`] with an explicit extra file instead of
/// `$MYCLOUD_CONFIG`.
pub fn load_with(extra: Option<&Path>) -> anyhow::Result<AppConfig> {
    let mut builder = ::config::Config::builder()
        .add_source(::config::File::from_str(DEFAULTS, ::config::FileFormat::Toml))
        .add_source(::config::File::with_name("mycloud").required(false));

    if let Some(path) = extra {
        builder = builder.add_source(::config::File::from(path).required(false));
    }
    // Environment variables last to have highest precedence
    builder = builder.add_source(::config::Environment::with_prefix("MYCLOUD").separator("__"));

    let cfg = builder.build()?;
    let app_cfg: AppConfig = cfg.try_deserialize()?;
    validate(&app_cfg)?;
    Ok(app_cfg)
}

pub fn validate(cfg: &AppConfig) -> anyhow::Result<()> {
    if cfg.server.port == 0 {
        return Err(anyhow::anyhow!("invalid server.port: {}", cfg.server.port));
    }
    #[cfg(unix)]
    if cfg.server.port < 1024 {
        tracing::warn!("Using privileged port {} - may require elevated permissions", cfg.server.port);
    }

    if cfg.ui.dir.trim().is_empty() {
        return Err(anyhow::anyhow!("ui.dir must not be empty"));
    }
    let base = cfg.ui.api_base.trim();
    if !(base.starts_with('/') || base.starts_with("http")) {
        return Err(anyhow::anyhow!("ui.api_base must start with '/' or 'http': {:?}", cfg.ui.api_base));
    }
    if cfg.ui.admin_email.trim().is_empty() {
        tracing::warn!("ui.admin_email is empty; the UI falls back to its built-in contact");
    }

    if let Some(sec) = cfg.security.as_ref() {
        if sec.enable_hsts.unwrap_or(false) && sec.hsts_max_age == Some(0) {
            return Err(anyhow::anyhow!("security.hsts_max_age must be > 0 when HSTS is enabled"));
        }
    }

    Ok(())
}
