use std::path::Path;

use once_cell::sync::Lazy;

use crate::Error;

pub const FALLBACK_API_BASE_URL: &str = "http://localhost:5261/v1";
pub const API_BASE_URL_VAR: &str = "API_BASE_URL";
pub const CONFIG_PATH_VAR: &str = "ESCOLA_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "./config.toml";

/// `API_BASE_URL` as seen the first time anything asks for it.
static ENV_API_BASE_URL: Lazy<Option<String>> =
    Lazy::new(|| env_base_url(std::env::var(API_BASE_URL_VAR).ok()));

#[derive(Debug, serde::Deserialize)]
pub struct Config {
    /// Hex-encoded key for the private cookie jar, at least 64 bytes.
    pub key: String,
    pub api_base_url: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
    pub request_timeout_secs: Option<u64>,
}

const fn default_port() -> u16 {
    8080
}

impl Config {
    /// Reads the file named by `ESCOLA_CONFIG`, or `./config.toml`.
    pub fn load() -> Result<Self, Error> {
        let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        Self::from_file(path)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let config_string = std::fs::read_to_string(path)?;
        Self::parse(&config_string)
    }

    pub fn parse(config_string: &str) -> Result<Self, Error> {
        Ok(toml::from_str(config_string)?)
    }

    /// Environment first, then the config file, then the fallback.
    #[must_use]
    pub fn api_base_url(&self) -> &str {
        pick_base_url(ENV_API_BASE_URL.as_deref(), self.api_base_url.as_deref())
    }

    pub fn cookie_key(&self) -> Result<Vec<u8>, Error> {
        Ok(hex::decode(self.key.trim())?)
    }
}

// an empty variable counts as unset
fn env_base_url(raw: Option<String>) -> Option<String> {
    raw.filter(|value| !value.is_empty())
}

fn pick_base_url<'a>(env: Option<&'a str>, file: Option<&'a str>) -> &'a str {
    env.or(file.filter(|value| !value.is_empty()))
        .unwrap_or(FALLBACK_API_BASE_URL)
}
