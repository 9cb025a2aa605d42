use std::{sync::Arc, time::Duration};

use tower_cookies::Key;

use crate::{Config, Error};

#[allow(clippy::module_name_repetitions)]
#[derive(Clone)]
pub struct AppState {
    pub client: reqwest::Client,
    pub api_base_url: Arc<str>,
    pub key: Arc<Key>,
}

impl AppState {
    /// Create a new [`AppState`] from the loaded [`Config`].
    pub fn new(config: &Config) -> Result<Self, Error> {
        let key_bytes = config.cookie_key()?;
        let key = Key::try_from(key_bytes.as_slice()).map_err(|_| Error::InvalidKey)?;
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(Error::HttpClient)?;
        Ok(Self::from_parts(client, config.api_base_url(), key))
    }

    #[must_use]
    pub fn from_parts(client: reqwest::Client, api_base_url: &str, key: Key) -> Self {
        Self {
            client,
            api_base_url: Arc::from(api_base_url),
            key: Arc::new(key),
        }
    }
}
