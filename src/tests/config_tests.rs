#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::sync::Mutex;

    use tempfile::NamedTempFile;

    use crate::config::{self, AppConfig, SecurityConfig, ServerConfig, UiConfig};

    // Tests that read MYCLOUD__* from the process environment run one at a time
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn write_temp_config(content: &str) -> NamedTempFile {
        let temp_file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        fs::write(temp_file.path(), content).unwrap();
        temp_file
    }

    fn valid() -> AppConfig {
        AppConfig {
            server: ServerConfig { host: "127.0.0.1".into(), port: 8080 },
            ui: UiConfig { dir: "dist".into(), api_base: "/api".into(), admin_email: "a@b.c".into() },
            security: Some(SecurityConfig::default()),
        }
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.ui.api_base, "/api");
        assert_eq!(config.ui.admin_email, "admin@example.com");
        let csp = config.security.and_then(|s| s.csp).unwrap();
        assert!(csp.contains("'wasm-unsafe-eval'"));
    }

    #[test]
    fn test_valid_config_does_not_error() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        assert!(config::load_with(None).is_ok());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let file = write_temp_config(
            "[server]\nport = 9191\n\n[ui]\napi_base = \"https://cloud.example/api\"\nadmin_email = \"ops@example.org\"\n",
        );

        let cfg = config::load_with(Some(file.path())).unwrap();

        assert_eq!(cfg.server.port, 9191);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.ui.api_base, "https://cloud.example/api");
        assert_eq!(cfg.ui.admin_email, "ops@example.org");
        assert_eq!(cfg.ui.dir, "webui/dist");
    }

    #[test]
    fn test_invalid_file_values_are_rejected() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let file = write_temp_config("[server]\nport = 0\n");
        let err = config::load_with(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("invalid server.port"));
    }

    #[test]
    fn test_env_has_highest_precedence() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let file = write_temp_config("[server]\nport = 9191\n");
        env::set_var("MYCLOUD__SERVER__PORT", "7070");

        let result = config::load_with(Some(file.path()));
        env::remove_var("MYCLOUD__SERVER__PORT");

        assert_eq!(result.unwrap().server.port, 7070);
    }

    #[test]
    fn test_missing_extra_file_is_ignored() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let cfg = config::load_with(Some(std::path::Path::new("/nonexistent/mycloud-extra.toml"))).unwrap();
        assert_eq!(cfg.server.port, 8080);
    }

    #[test]
    fn test_validate_api_base() {
        let mut cfg = valid();
        assert!(config::validate(&cfg).is_ok());

        cfg.ui.api_base = "api".into();
        assert!(config::validate(&cfg).unwrap_err().to_string().contains("ui.api_base"));

        cfg.ui.api_base = "http://localhost:8000/api".into();
        assert!(config::validate(&cfg).is_ok());
    }

    #[test]
    fn test_validate_ui_dir_and_hsts() {
        let mut cfg = valid();
        cfg.ui.dir = "  ".into();
        assert!(config::validate(&cfg).is_err());

        let mut cfg = valid();
        cfg.security = Some(SecurityConfig { enable_hsts: Some(true), hsts_max_age: Some(0), ..Default::default() });
        assert!(config::validate(&cfg).is_err());
    }
}
