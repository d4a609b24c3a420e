use crate::constants::{
    DEFAULT_CORS_ORIGIN, DEFAULT_DB_NAME, DEFAULT_GEMINI_MODEL, DEFAULT_HOST, DEFAULT_PORT,
};
use std::fmt;

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(name) => {
                write!(f, "{} is missing. Please set it in your .env file.", name)
            }
            ConfigError::Invalid { name, value } => write!(f, "{} has an invalid value '{}'", name, value),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Process configuration, read once at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub api_key: String,
    pub firebase_api_key: String,
    pub mongodb_uri: String,
    pub mongodb_db: String,
    pub cors_origin: String,
    pub gemini_model: String,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let required = |name: &'static str| present(name).ok_or(ConfigError::Missing(name));
        let optional = |name: &str, default: &str| present(name).unwrap_or_else(|| default.to_string());

        let port_value = optional("PORT", DEFAULT_PORT);
        let port = port_value.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
            name: "PORT",
            value: port_value.clone(),
        })?;

        Ok(AppConfig {
            api_key: required("API_KEY")?,
            firebase_api_key: required("FIREBASE_API_KEY")?,
            mongodb_uri: required("MONGODB_URI")?,
            mongodb_db: optional("MONGODB_DB", DEFAULT_DB_NAME),
            cors_origin: optional("CORS_ORIGIN", DEFAULT_CORS_ORIGIN),
            gemini_model: optional("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            host: optional("HOST", DEFAULT_HOST),
            port,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
