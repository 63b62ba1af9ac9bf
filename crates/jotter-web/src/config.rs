use std::collections::HashMap;
use std::env;
use std::fmt;

use thiserror::Error;

/// Shortest accepted session secret, in bytes.
pub const MIN_SESSION_SECRET_LEN: usize = 32;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub database_path: String,
    pub session_secret: String,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("database_path", &self.database_path)
            .field("session_secret", &"[REDACTED]")
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let values: HashMap<String, String> = env::vars().collect();
        Self::from_lookup(|name| values.get(name).cloned())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = value_or_default(&lookup, "JOTTER_HOST", "127.0.0.1");

        let port = value_or_default(&lookup, "JOTTER_PORT", "5000")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::Invalid("JOTTER_PORT must be an integer in [1, 65535]".to_string())
            })?;
        if port == 0 {
            return Err(ConfigError::Invalid(
                "JOTTER_PORT must be in [1, 65535]".to_string(),
            ));
        }

        let database_path = value_or_default(&lookup, "JOTTER_DATABASE_PATH", "jotter.db");

        let session_secret = required_trimmed(&lookup, "JOTTER_SESSION_SECRET")?;
        if session_secret.len() < MIN_SESSION_SECRET_LEN {
            return Err(ConfigError::Invalid(format!(
                "JOTTER_SESSION_SECRET must be at least {MIN_SESSION_SECRET_LEN} bytes"
            )));
        }

        Ok(Self {
            bind_addr: format!("{host}:{port}"),
            database_path,
            session_secret,
        })
    }
}

fn value_or_default(lookup: impl Fn(&str) -> Option<String>, name: &str, default: &str) -> String {
    optional_trimmed(lookup, name).unwrap_or_else(|| default.to_string())
}

fn required_trimmed(
    lookup: impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    optional_trimmed(lookup, name).ok_or(ConfigError::MissingVar(name))
}

fn optional_trimmed(lookup: impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name).and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
