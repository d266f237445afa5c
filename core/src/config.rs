//! Client configuration.
//!
//! Explicit values win over the environment. `BRAZE_BASE_URL` and
//! `BRAZE_API_KEY` fill in whatever was not set explicitly.

use url::Url;

use crate::error::ConfigError;

pub const BASE_URL_ENV: &str = "BRAZE_BASE_URL";
pub const API_KEY_ENV: &str = "BRAZE_API_KEY";

const DEFAULT_USER_AGENT: &str = concat!("braze-core/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub user_agent: String,
}

impl ClientConfig {
    /// Validates `base_url` and strips any trailing slash.
    pub fn new(base_url: &str, api_key: Option<&str>) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: validate_base_url(base_url)?,
            api_key: api_key.filter(|k| !k.is_empty()).map(str::to_string),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(None, None, |name| std::env::var(name).ok())
    }

    pub fn with_overrides(base_url: Option<&str>, api_key: Option<&str>) -> Result<Self, ConfigError> {
        Self::resolve(base_url, api_key, |name| std::env::var(name).ok())
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    fn resolve(
        base_url: Option<&str>,
        api_key: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let env_base = env(BASE_URL_ENV);
        let base_url = base_url
            .or(env_base.as_deref())
            .filter(|u| !u.is_empty())
            .ok_or(ConfigError::MissingBaseUrl)?;
        let env_key = env(API_KEY_ENV);
        Self::new(base_url, api_key.or(env_key.as_deref()))
    }
}

fn validate_base_url(raw: &str) -> Result<String, ConfigError> {
    let parsed = Url::parse(raw).map_err(|e| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme {}", parsed.scheme()),
        });
    }
    Ok(raw.trim_end_matches('/').to_string())
}
