// config.rs - Runtime configuration
//
// Values come from the environment, optionally loaded from a `.env` file.

use std::env;
use std::time::Duration;

use thiserror::Error;

use crate::web_app::components::toast::DEFAULT_TOAST_LIFE_MS;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/products";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a whole number of milliseconds, got '{value}'")]
    InvalidMillis { name: &'static str, value: String },

    #[error("{0} must not be empty")]
    Empty(&'static str),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Products endpoint, without a trailing slash
    pub base_url: String,
    /// Wait before issuing a search; zero searches on every keystroke
    pub search_debounce: Duration,
    pub toast_life: Duration,
    pub request_timeout: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            search_debounce: Duration::ZERO,
            toast_life: Duration::from_millis(DEFAULT_TOAST_LIFE_MS),
            request_timeout: None,
        }
    }
}

impl AppConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn with_search_debounce(mut self, debounce: Duration) -> Self {
        self.search_debounce = debounce;
        self
    }

    pub fn with_toast_life(mut self, life: Duration) -> Self {
        self.toast_life = life;
        self
    }

    /// Load `.env` then read the `PRODUCTS_*` variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("PRODUCTS_API_URL") {
            let url = url.trim().trim_end_matches('/');
            if url.is_empty() {
                return Err(ConfigError::Empty("PRODUCTS_API_URL"));
            }
            config.base_url = url.to_string();
        }

        if let Some(ms) = millis(&lookup, "PRODUCTS_SEARCH_DEBOUNCE_MS")? {
            config.search_debounce = ms;
        }
        if let Some(ms) = millis(&lookup, "PRODUCTS_TOAST_LIFE_MS")? {
            config.toast_life = ms;
        }
        config.request_timeout = millis(&lookup, "PRODUCTS_REQUEST_TIMEOUT_MS")?;

        tracing::debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }
}

fn millis<F>(lookup: &F, name: &'static str) -> Result<Option<Duration>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map(|ms| Some(Duration::from_millis(ms)))
            .map_err(|_| ConfigError::InvalidMillis { name, value }),
    }
}
