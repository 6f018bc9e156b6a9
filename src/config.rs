//! Configuration management for the `geolocate` clients
//!
//! Handles loading configuration from a TOML file, `.env` and environment
//! variables, and validates the settings before any client is built.

use crate::GeoError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable the routing API key is read from when no other
/// source sets it.
pub const ROUTING_API_KEY_ENV: &str = "OPEN_ROUTE_SERVICE_API_KEY";

/// Prefix for environment overrides, e.g. `GEOLOCATE_PLACE__BASE_URL`
const ENV_PREFIX: &str = "GEOLOCATE";

const DEFAULT_CONFIG_FILE: &str = "geolocate.toml";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeoConfig {
    /// OneMap address search
    #[serde(default)]
    pub address: AddressConfig,
    /// OpenRouteService directions
    #[serde(default)]
    pub routing: RoutingConfig,
    /// Nominatim place search
    #[serde(default)]
    pub place: PlaceConfig,
    /// Shared HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// OneMap search API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressConfig {
    #[serde(default = "default_address_base_url")]
    pub base_url: String,
}

/// OpenRouteService directions API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    #[serde(default = "default_routing_base_url")]
    pub base_url: String,
    /// API key sent as the `api_key` query parameter
    pub api_key: Option<String>,
}

/// Nominatim search API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceConfig {
    #[serde(default = "default_place_base_url")]
    pub base_url: String,
}

/// HTTP client settings shared by all clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds; unset keeps the client default
    pub timeout_seconds: Option<u32>,
    /// User agent header; Nominatim refuses anonymous requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_address_base_url() -> String {
    "https://www.onemap.gov.sg".to_string()
}

fn default_routing_base_url() -> String {
    "https://api.openrouteservice.org".to_string()
}

fn default_place_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_user_agent() -> String {
    format!("geolocate/{}", crate::VERSION)
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for AddressConfig {
    fn default() -> Self {
        Self {
            base_url: default_address_base_url(),
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_url: default_routing_base_url(),
            api_key: None,
        }
    }
}

impl Default for PlaceConfig {
    fn default() -> Self {
        Self {
            base_url: default_place_base_url(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: None,
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl GeoConfig {
    /// Load configuration from `.env`, the default file and the environment
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from the given TOML file, falling back to
    /// `geolocate.toml` in the working directory
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let config_file = config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let mut builder = Config::builder();
        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder.build().with_context(|| {
            format!(
                "Failed to build configuration from {}",
                config_file.display()
            )
        })?;

        let mut config: GeoConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.fill_api_key(std::env::var(ROUTING_API_KEY_ENV).ok());
        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Use `key` as the routing API key unless one is already configured.
    /// Blank keys count as missing.
    pub fn fill_api_key(&mut self, key: Option<String>) {
        let configured = self.routing.api_key.take().filter(|k| !k.trim().is_empty());
        self.routing.api_key = configured.or_else(|| key.filter(|k| !k.trim().is_empty()));
    }

    /// Apply default values to fields left empty by a config source
    pub fn apply_defaults(&mut self) {
        if self.address.base_url.is_empty() {
            self.address.base_url = default_address_base_url();
        }
        if self.routing.base_url.is_empty() {
            self.routing.base_url = default_routing_base_url();
        }
        if self.place.base_url.is_empty() {
            self.place.base_url = default_place_base_url();
        }
        if self.http.user_agent.is_empty() {
            self.http.user_agent = default_user_agent();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_urls()?;
        self.validate_http()?;
        self.validate_logging()?;
        Ok(())
    }

    fn validate_urls(&self) -> Result<()> {
        for (name, url) in [
            ("address", &self.address.base_url),
            ("routing", &self.routing.base_url),
            ("place", &self.place.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(GeoError::config(format!(
                    "{name} base URL must be a valid HTTP or HTTPS URL, got '{url}'"
                ))
                .into());
            }
        }
        Ok(())
    }

    fn validate_http(&self) -> Result<()> {
        match self.http.timeout_seconds {
            Some(0) => Err(GeoError::config("HTTP timeout must be at least 1 second").into()),
            Some(secs) if secs > 300 => {
                Err(GeoError::config("HTTP timeout cannot exceed 300 seconds").into())
            }
            _ => Ok(()),
        }
    }

    fn validate_logging(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(GeoError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(GeoError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::env;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = GeoConfig::default();
        assert_eq!(config.address.base_url, "https://www.onemap.gov.sg");
        assert_eq!(config.routing.base_url, "https://api.openrouteservice.org");
        assert_eq!(config.place.base_url, "https://nominatim.openstreetmap.org");
        assert!(config.routing.api_key.is_none());
        assert!(config.http.timeout_seconds.is_none());
        assert!(config.http.user_agent.starts_with("geolocate/"));
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_fill_api_key_keeps_configured_key() {
        let mut config = GeoConfig::default();
        config.routing.api_key = Some("from_file".to_string());
        config.fill_api_key(Some("from_env".to_string()));
        assert_eq!(config.routing.api_key.as_deref(), Some("from_file"));

        let mut config = GeoConfig::default();
        config.fill_api_key(Some("from_env".to_string()));
        assert_eq!(config.routing.api_key.as_deref(), Some("from_env"));
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let mut config = GeoConfig::default();
        config.fill_api_key(Some(String::new()));
        assert!(config.routing.api_key.is_none());

        let mut config = GeoConfig::default();
        config.routing.api_key = Some("  ".to_string());
        config.fill_api_key(Some("from_env".to_string()));
        assert_eq!(config.routing.api_key.as_deref(), Some("from_env"));

        let mut config = GeoConfig::default();
        config.routing.api_key = Some("  ".to_string());
        config.fill_api_key(None);
        assert!(config.routing.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_with_blank_env_key() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");

        // SAFETY: Test environment, no other test reads this variable
        // without an explicit key in its config file
        unsafe {
            env::set_var(ROUTING_API_KEY_ENV, "");
        }

        let result = GeoConfig::load_from_path(Some(missing));

        // SAFETY: Test cleanup
        unsafe {
            env::remove_var(ROUTING_API_KEY_ENV);
        }

        let config = result.unwrap();
        assert!(config.routing.api_key.is_none());
    }

    #[rstest]
    #[case(Some(0), false)]
    #[case(Some(1), true)]
    #[case(Some(300), true)]
    #[case(Some(301), false)]
    #[case(None, true)]
    fn test_timeout_range(#[case] timeout: Option<u32>, #[case] valid: bool) {
        let mut config = GeoConfig::default();
        config.http.timeout_seconds = timeout;
        assert_eq!(config.validate().is_ok(), valid);
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = GeoConfig::default();
        config.logging.level = "verbose".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_invalid_base_url() {
        let mut config = GeoConfig::default();
        config.place.base_url = "nominatim.openstreetmap.org".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("place base URL"));
    }

    #[test]
    fn test_apply_defaults_fills_empty_fields() {
        let mut config = GeoConfig::default();
        config.routing.base_url.clear();
        config.logging.format.clear();
        config.apply_defaults();
        assert_eq!(config.routing.base_url, "https://api.openrouteservice.org");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[routing]
base_url = "http://localhost:8080"
api_key = "key_from_file"

[http]
timeout_seconds = 20

[logging]
level = "debug"
"#
        )
        .unwrap();

        let config = GeoConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.routing.base_url, "http://localhost:8080");
        assert_eq!(config.routing.api_key.as_deref(), Some("key_from_file"));
        assert_eq!(config.http.timeout_seconds, Some(20));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.address.base_url, "https://www.onemap.gov.sg");
    }

    #[test]
    fn test_load_rejects_invalid_file_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nformat = \"xml\"").unwrap();

        let result = GeoConfig::load_from_path(Some(file.path().to_path_buf()));
        assert!(result.unwrap_err().to_string().contains("Invalid log format"));
    }
}
