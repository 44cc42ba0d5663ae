//! Client configuration parsed from environment variables.
//!
//! The API base address is deployment-specific, so it is injected here rather
//! than compiled into the request helpers.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api/v1";

pub const API_URL_ENV: &str = "KAKEIBO_API_URL";
pub const SESSION_COOKIE_ENV: &str = "KAKEIBO_SESSION_COOKIE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base address without a trailing slash (e.g. `http://localhost:3000/api/v1`).
    pub api_url: String,
    /// Optional `name=value` cookie pair forwarded on every request.
    pub session_cookie: Option<String>,
}

impl ClientConfig {
    /// Build a config pointing at `api_url` with no preset session cookie.
    #[must_use]
    pub fn new(api_url: &str) -> Self {
        Self { api_url: normalize_base_url(api_url), session_cookie: None }
    }

    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `KAKEIBO_API_URL`: default `http://localhost:3000/api/v1`
    /// - `KAKEIBO_SESSION_COOKIE`: `name=value` pair, empty means unset
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup(API_URL_ENV)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        let session_cookie = lookup(SESSION_COOKIE_ENV)
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty());

        Self { api_url: normalize_base_url(&api_url), session_cookie }
    }

    #[must_use]
    pub fn with_session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = Some(cookie.into());
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}
