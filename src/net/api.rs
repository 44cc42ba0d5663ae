//! REST API helpers for communicating with the bookkeeping server.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns a typed `ClientError` so callers can log the cause.
//! Whether a failure is surfaced or swallowed is the caller's decision; the
//! session store swallows all of them.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use reqwest::header::{COOKIE, HeaderMap, HeaderValue};

use super::types::User;
use crate::config::ClientConfig;
use crate::error::ClientError;

/// Thin HTTP wrapper around the bookkeeping API.
///
/// Cloning is cheap; clones share the connection pool and cookie jar.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client with a persistent cookie store so the server's session
    /// cookie is forwarded on every subsequent request.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured session cookie is not a valid header
    /// value or the HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = &config.session_cookie {
            headers.insert(COOKIE, HeaderValue::from_str(cookie)?);
        }
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.api_url.clone() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn user_endpoint(&self) -> String {
        user_endpoint(&self.base_url)
    }

    /// Fetch the currently authenticated user from `GET <base>/user`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server answers with a
    /// non-success status, or the body is not a valid user record.
    pub async fn fetch_current_user(&self) -> Result<User, ClientError> {
        let response = self.http.get(self.user_endpoint()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status { status: status.as_u16() });
        }

        let text = response.text().await?;
        parse_user(&text)
    }
}

fn user_endpoint(base_url: &str) -> String {
    format!("{}/user", base_url.trim_end_matches('/'))
}

fn parse_user(json: &str) -> Result<User, ClientError> {
    serde_json::from_str(json).map_err(|e| ClientError::Decode(e.to_string()))
}
