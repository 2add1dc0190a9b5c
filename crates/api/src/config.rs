use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    /// Outbound SMS gateway configuration.
    #[serde(default)]
    pub sms: SmsConfig,
    /// Background job configuration.
    #[serde(default)]
    pub jobs: JobsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

impl DatabaseConfig {
    /// The persistence-layer view of this configuration.
    pub fn pool_config(&self) -> persistence::db::DatabaseConfig {
        persistence::db::DatabaseConfig {
            url: self.url.clone(),
            max_connections: self.max_connections,
            min_connections: self.min_connections,
            connect_timeout_secs: self.connect_timeout_secs,
            idle_timeout_secs: self.idle_timeout_secs,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// "json" for structured output, anything else for pretty console logs.
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// SMS gateway configuration.
///
/// With `enabled = false` the service runs against the in-process mock
/// gateway, which accepts every message. Credentials are only required when
/// the real HTTP gateway is enabled.
#[derive(Debug, Clone, Deserialize)]
pub struct SmsConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Provider API base URL, e.g. https://api.africastalking.com
    #[serde(default)]
    pub base_url: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub api_key: String,

    /// Registered alphanumeric sender id, sent as `from` when non-empty.
    #[serde(default)]
    pub sender_id: String,

    #[serde(default = "default_sms_timeout_ms")]
    pub timeout_ms: u64,

    /// Country code used to normalize local phone numbers, e.g. "256".
    #[serde(default = "default_country_code")]
    pub default_country_code: String,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: String::new(),
            username: String::new(),
            api_key: String::new(),
            sender_id: String::new(),
            timeout_ms: default_sms_timeout_ms(),
            default_country_code: default_country_code(),
        }
    }
}

/// Background job configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JobsConfig {
    /// Run the batch matcher periodically instead of only on demand.
    #[serde(default)]
    pub batch_match_enabled: bool,

    #[serde(default = "default_batch_match_interval")]
    pub batch_match_interval_minutes: u64,
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            batch_match_enabled: false,
            batch_match_interval_minutes: default_batch_match_interval(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_idle_timeout() -> u64 {
    600
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_sms_timeout_ms() -> u64 {
    10_000
}

fn default_country_code() -> String {
    "256".to_string()
}

fn default_batch_match_interval() -> u64 {
    30
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with RO__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("RO").separator("__"))
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Load configuration for testing with custom overrides.
    ///
    /// This method creates a config entirely from defaults and overrides,
    /// without relying on config files (which may not be accessible during tests).
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        // Embed defaults directly to avoid file system dependency in tests
        let defaults = r#"
            [server]
            host = "0.0.0.0"
            port = 8080
            request_timeout_secs = 30

            [database]
            url = ""
            max_connections = 20
            min_connections = 5
            connect_timeout_secs = 10
            idle_timeout_secs = 600

            [logging]
            level = "info"
            format = "json"

            [sms]
            enabled = false
            base_url = ""
            username = ""
            api_key = ""
            sender_id = ""
            timeout_ms = 10000
            default_country_code = "256"

            [jobs]
            batch_match_enabled = false
            batch_match_interval_minutes = 30
        "#;

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(defaults, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        // Skip validation in tests to allow partial configs
        Ok(cfg)
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.database.url.is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "RO__DATABASE__URL environment variable must be set".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "Server port cannot be 0".to_string(),
            ));
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigValidationError::InvalidValue(
                "min_connections cannot exceed max_connections".to_string(),
            ));
        }

        if self.sms.enabled {
            if self.sms.base_url.is_empty() {
                return Err(ConfigValidationError::MissingRequired(
                    "sms.base_url must be set when the SMS gateway is enabled".to_string(),
                ));
            }
            if self.sms.username.is_empty() || self.sms.api_key.is_empty() {
                return Err(ConfigValidationError::MissingRequired(
                    "sms.username and sms.api_key must be set when the SMS gateway is enabled"
                        .to_string(),
                ));
            }
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigValidationError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|_| {
                ConfigValidationError::InvalidValue(format!(
                    "Invalid server address {}:{}",
                    self.server.host, self.server.port
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_load() {
        let config = Config::load_for_test(&[]).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "info");
        assert!(!config.sms.enabled);
        assert_eq!(config.sms.default_country_code, "256");
        assert!(!config.jobs.batch_match_enabled);
    }

    #[test]
    fn test_overrides_apply() {
        let config = Config::load_for_test(&[
            ("server.port", "9090"),
            ("sms.default_country_code", "254"),
            ("jobs.batch_match_enabled", "true"),
        ])
        .unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.sms.default_country_code, "254");
        assert!(config.jobs.batch_match_enabled);
    }

    #[test]
    fn test_validate_rejects_missing_database_url() {
        let config = Config::load_for_test(&[]).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::MissingRequired(_))
        ));
    }

    #[test]
    fn test_validate_rejects_enabled_sms_without_credentials() {
        let config = Config::load_for_test(&[
            ("database.url", "postgres://localhost/reachout"),
            ("sms.enabled", "true"),
            ("sms.base_url", "https://api.africastalking.com"),
        ])
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::MissingRequired(_))
        ));
    }

    #[test]
    fn test_socket_addr() {
        let config = Config::load_for_test(&[("server.host", "127.0.0.1")]).unwrap();
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:8080");
    }
}
