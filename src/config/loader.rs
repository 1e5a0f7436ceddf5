use crate::config::constants::*;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid port: {0}")]
    InvalidPort(String),
    #[error("Invalid listen address: {0}")]
    InvalidAddress(String),
    #[error("Missing publishable key, add AUTH_PUBLISHABLE_KEY to your .env")]
    MissingPublishableKey,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Allowed CORS origin, `*` allows any origin.
    pub frontend_url: String,
    /// Base URL the dashboard uses to reach the API, empty means same host.
    pub api_url: String,
    pub publishable_key: Option<String>,
    pub app_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            api_url: String::new(),
            publishable_key: None,
            app_name: DEFAULT_APP_NAME.to_string(),
        }
    }
}

impl Config {
    /// Resolve defaults, then the optional YAML file named by `BEACON_CONFIG`,
    /// then the process environment (including a `.env` file if present).
    pub fn new() -> Result<Config, ConfigError> {
        let _ = dotenvy::dotenv();

        let base = match env::var(CONFIG_FILE_VAR) {
            Ok(path) => Config::from_file(path)?,
            Err(_) => Config::default(),
        };

        base.with_env(|key| env::var(key).ok())
    }

    pub fn from_file<P: AsRef<Path>>(input_file: P) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(input_file)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Blank values count as unset, so `PORT=` in a `.env` keeps the default.
    pub fn with_env<F>(mut self, lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(host) = non_blank(HOST_VAR) {
            self.host = host;
        }
        if let Some(port) = non_blank(PORT_VAR) {
            let parsed: u16 = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port))?;
            // 0 would bind a random port
            if parsed != 0 {
                self.port = parsed;
            }
        }
        if let Some(url) = non_blank(DATABASE_URL_VAR) {
            self.database_url = url;
        }
        if let Some(origin) = non_blank(FRONTEND_URL_VAR) {
            self.frontend_url = origin;
        }
        if let Some(url) = non_blank(API_URL_VAR) {
            self.api_url = url;
        }
        if let Some(key) = non_blank(PUBLISHABLE_KEY_VAR) {
            self.publishable_key = Some(key);
        }
        if let Some(name) = non_blank(APP_NAME_VAR) {
            self.app_name = name;
        }
        Ok(self)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| ConfigError::InvalidAddress(self.host.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn api_base_url(&self) -> String {
        let trimmed = self.api_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            format!("http://127.0.0.1:{}", self.port)
        } else {
            trimmed.to_string()
        }
    }

    pub fn health_url(&self) -> String {
        format!("{}{}", self.api_base_url(), API_HEALTH_PATH)
    }

    pub fn require_publishable_key(&self) -> Result<&str, ConfigError> {
        match self.publishable_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(ConfigError::MissingPublishableKey),
        }
    }
}
