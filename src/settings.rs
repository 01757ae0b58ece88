//! Relay configuration
//!
//! Settings are loaded from `Relay.toml` in the current directory when it
//! exists, then overridden by environment variables. Endpoint defaults match
//! the relying-party routes the relay was written against.

use serde::{Deserialize, Serialize};
use std::fs;
use url::Url;

use crate::errors::RelayError;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RelaySettings {
    pub server: ServerSettings,
    pub endpoints: EndpointSettings,
    pub http: HttpSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Base URL of the relying-party server
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointSettings {
    pub register_start: String,
    pub register_finish: String,
    pub authenticate_start: String,
    pub authenticate_finish: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Request timeout for both round trips, in seconds
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
        }
    }
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            register_start: "/webauthn/start_register".to_string(),
            register_finish: "/webauthn/finish_register".to_string(),
            authenticate_start: "/webauthn/start_auth".to_string(),
            authenticate_finish: "/webauthn/finish_auth".to_string(),
        }
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl RelaySettings {
    /// Load settings from `Relay.toml` and environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file cannot be read or parsed.
    pub fn load() -> Result<Self, RelayError> {
        let mut settings = if std::path::Path::new("Relay.toml").exists() {
            Self::load_from_file("Relay.toml")?
        } else {
            Self::default()
        };

        Self::apply_env_overrides(&mut settings);
        Ok(settings)
    }

    /// Load settings from a specific TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or TOML parsing fails.
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Self, RelayError> {
        let toml_content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RelayError::Configuration(format!(
                "failed to read {}: {e}",
                path.as_ref().display()
            ))
        })?;
        basic_toml::from_str(&toml_content)
            .map_err(|e| RelayError::Configuration(format!("invalid settings file: {e}")))
    }

    /// Apply environment variable overrides to settings
    pub fn apply_env_overrides(settings: &mut Self) {
        if let Ok(base_url) = std::env::var("RELAY_SERVER_URL") {
            settings.server.base_url = base_url;
        }
        if let Ok(timeout_str) = std::env::var("RELAY_TIMEOUT_SECONDS") {
            if let Ok(timeout) = timeout_str.parse::<u64>() {
                settings.http.timeout_seconds = timeout;
            }
        }
        if let Ok(log_level) = std::env::var("RUST_LOG") {
            settings.logging.level = log_level;
        }
    }

    /// Initialize the logger from the configured level
    ///
    /// Safe to call more than once; later calls are ignored.
    pub fn init_logging(&self) {
        let _ = env_logger::Builder::new()
            .parse_filters(&self.logging.level)
            .try_init();
    }

    /// Resolve an endpoint path against the server base URL
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or the joined URL is invalid.
    pub fn endpoint_url(&self, path: &str) -> Result<Url, RelayError> {
        let base = Url::parse(&self.server.base_url)
            .map_err(|e| RelayError::Configuration(format!("invalid base URL: {e}")))?;
        base.join(path)
            .map_err(|e| RelayError::Configuration(format!("invalid endpoint path {path}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn clean_env_vars() {
        std::env::remove_var("RELAY_SERVER_URL");
        std::env::remove_var("RELAY_TIMEOUT_SECONDS");
    }

    #[test]
    fn test_default_endpoints() {
        let settings = RelaySettings::default();
        assert_eq!(settings.endpoints.register_start, "/webauthn/start_register");
        assert_eq!(settings.endpoints.register_finish, "/webauthn/finish_register");
        assert_eq!(settings.endpoints.authenticate_start, "/webauthn/start_auth");
        assert_eq!(settings.endpoints.authenticate_finish, "/webauthn/finish_auth");
        assert_eq!(settings.http.timeout_seconds, 30);
    }

    #[test]
    fn test_endpoint_url_resolution() {
        let settings = RelaySettings::default();
        let url = settings
            .endpoint_url(&settings.endpoints.register_start)
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/webauthn/start_register");
    }

    #[test]
    fn test_endpoint_url_invalid_base() {
        let mut settings = RelaySettings::default();
        settings.server.base_url = "not a url".to_string();
        assert!(settings.endpoint_url("/webauthn/start_auth").is_err());
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clean_env_vars();

        let mut settings = RelaySettings::default();
        std::env::set_var("RELAY_SERVER_URL", "https://auth.example.com");
        std::env::set_var("RELAY_TIMEOUT_SECONDS", "5");

        RelaySettings::apply_env_overrides(&mut settings);

        assert_eq!(settings.server.base_url, "https://auth.example.com");
        assert_eq!(settings.http.timeout_seconds, 5);

        clean_env_vars();
    }

    #[test]
    #[serial]
    fn test_invalid_timeout_env_is_ignored() {
        clean_env_vars();

        let mut settings = RelaySettings::default();
        std::env::set_var("RELAY_TIMEOUT_SECONDS", "not-a-number");

        RelaySettings::apply_env_overrides(&mut settings);
        assert_eq!(settings.http.timeout_seconds, 30);

        clean_env_vars();
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[server]
base_url = "https://zauth.example.com"

[endpoints]
register_start = "/webauthn/start_register"
register_finish = "/webauthn/finish_register"
authenticate_start = "/webauthn/start_auth"
authenticate_finish = "/webauthn/finish_auth"

[http]
timeout_seconds = 10

[logging]
level = "debug"
"#
        )
        .unwrap();

        let settings = RelaySettings::load_from_file(file.path()).unwrap();
        assert_eq!(settings.server.base_url, "https://zauth.example.com");
        assert_eq!(settings.http.timeout_seconds, 10);
        assert_eq!(settings.logging.level, "debug");
    }

    #[test]
    fn test_load_from_missing_file() {
        assert!(RelaySettings::load_from_file("/nonexistent/Relay.toml").is_err());
    }
}
