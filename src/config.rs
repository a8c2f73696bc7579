use serde_json::{Map, Value};
use std::time::Duration;
use thiserror::Error;

use crate::user::RongCloudConfig;

const DEFAULT_PORT: u16 = 8585;
const DEFAULT_API_URL: &str = "https://api-cn.ronghub.com";
const DEFAULT_PORTRAIT_URI: &str =
    "https://developer.rongcloud.cn/static/images/newversion-logo.png";
const DEFAULT_TOKEN_TIMEOUT_SECS: u64 = 10;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is not valid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Process configuration read from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub rongcloud: RongCloudConfig,
    pub app_version: Map<String, Value>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let timeout_secs = parse_or(&lookup, "TOKEN_TIMEOUT_SECS", DEFAULT_TOKEN_TIMEOUT_SECS)?;

        let rongcloud = RongCloudConfig {
            app_key: required(&lookup, "RONGCLOUD_APP_KEY")?,
            app_secret: required(&lookup, "RONGCLOUD_APP_SECRET")?,
            api_url: lookup("RONGCLOUD_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            portrait_uri: lookup("RONGCLOUD_PORTRAIT_URI")
                .unwrap_or_else(|| DEFAULT_PORTRAIT_URI.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        };

        let app_version = match lookup("APP_VERSION") {
            Some(raw) => parse_version(&raw)?,
            None => Map::new(),
        };

        Ok(Self {
            port,
            rongcloud,
            app_version,
        })
    }
}

fn required<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

fn parse_version(raw: &str) -> Result<Map<String, Value>, ConfigError> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ConfigError::Invalid {
            name: "APP_VERSION",
            reason: "expected a JSON object".to_string(),
        }),
        Err(e) => Err(ConfigError::Invalid {
            name: "APP_VERSION",
            reason: e.to_string(),
        }),
    }
}
