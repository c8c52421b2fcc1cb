//! Application Configuration
//!
//! Loads configuration from files and environment variables.

use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use validator::Validate;

use crate::domain::models::credentials::RedisCredentials;
use crate::domain::models::envelope::validate_filter_id;
use crate::shared::errors::MessagingError;

/// Default connect and response timeout for Redis
pub const DEFAULT_REDIS_TIMEOUT_MS: u64 = 2_000;

/// Default time a data request waits for its answer
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 100;

/// Redis connection configuration
///
/// Either `uri` or the discrete host/port fields are used; `uri` wins when set.
/// With a `uri`, `user` must be unset and `password` is only allowed when the
/// URI carries no credentials of its own.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_uri_overrides"))]
pub struct RedisConfig {
    #[serde(default)]
    pub uri: Option<String>,
    #[validate(length(min = 1, message = "host must not be empty"))]
    #[serde(default = "default_host")]
    pub host: String,
    #[validate(range(min = 1, message = "port must be at least 1"))]
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub ssl: bool,
    #[validate(range(min = 1, message = "timeout_ms must be at least 1"))]
    #[serde(default = "default_redis_timeout_ms")]
    pub timeout_ms: u64,
}

/// Messaging behaviour configuration
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MessagingConfig {
    /// Filter ID this node answers to
    #[validate(custom(function = "validate_filter_id_field"))]
    #[serde(default)]
    pub filter_id: Option<String>,
    #[validate(range(min = 1, max = 60000, message = "request_timeout_ms must be between 1 and 60000"))]
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub json: bool,
}

/// Application configuration
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AppConfig {
    #[validate(nested)]
    pub redis: RedisConfig,
    #[validate(nested)]
    pub messaging: MessagingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn validate_filter_id_field(filter_id: &str) -> Result<(), validator::ValidationError> {
    validate_filter_id(filter_id).map_err(|_| {
        let mut error = validator::ValidationError::new("filter_id");
        error.message = Some("filter_id must not be empty or contain ';'".into());
        error
    })
}

fn validate_uri_overrides(redis: &RedisConfig) -> Result<(), validator::ValidationError> {
    match redis.uri_conflict() {
        Some(field) => {
            let mut error = validator::ValidationError::new("uri");
            error.message = Some(format!("uri conflicts with {field}").into());
            Err(error)
        }
        None => Ok(()),
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    6379
}

fn default_redis_timeout_ms() -> u64 {
    DEFAULT_REDIS_TIMEOUT_MS
}

fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}

impl AppConfig {
    /// Load configuration from files and environment
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "default".into());

        Config::builder()
            // Start with default config
            .add_source(File::with_name("config/default").required(true))
            // Merge environment-specific config if it exists
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Override with environment variables (e.g., APP__REDIS__PORT)
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()
    }
}

impl RedisConfig {
    /// Resolve the credentials described by this configuration
    ///
    /// # Errors
    ///
    /// Returns `MessagingError::InvalidUri` if `uri` is set but malformed and
    /// `MessagingError::ConflictingCredentials` if `uri` would discard
    /// `user` or `password`.
    pub fn credentials(&self) -> Result<RedisCredentials, MessagingError> {
        if let Some(field) = self.uri_conflict() {
            return Err(MessagingError::ConflictingCredentials(field));
        }
        if let Some(uri) = &self.uri {
            return match &self.password {
                Some(password) => RedisCredentials::from_uri_with_password(uri, Some(password)),
                None => RedisCredentials::from_uri(uri),
            };
        }

        let mut credentials = RedisCredentials::new(&self.host, self.port).with_ssl(self.ssl);
        if let Some(password) = &self.password {
            credentials = credentials.with_password(password.as_str());
        }
        if let Some(user) = &self.user {
            credentials = credentials.with_user(user.as_str());
        }
        Ok(credentials)
    }

    /// The field a configured `uri` would silently override, if any
    fn uri_conflict(&self) -> Option<&'static str> {
        let uri = self.uri.as_ref()?;
        if self.user.is_some() {
            Some("redis.user")
        } else if self.password.is_some() && uri.contains('@') {
            Some("redis.password")
        } else {
            None
        }
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl MessagingConfig {
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            uri: None,
            host: default_host(),
            port: default_port(),
            user: None,
            password: None,
            ssl: false,
            timeout_ms: DEFAULT_REDIS_TIMEOUT_MS,
        }
    }
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            filter_id: None,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}
