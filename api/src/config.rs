//! Backend connection settings.

use crate::error::ApiError;

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for ApiTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL without a trailing slash, e.g. `http://localhost:8080/api`.
    pub base_url: String,
    /// Bearer token sent with every request once set.
    pub token: Option<String>,
    pub timeouts: ApiTimeouts,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ApiConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        Self { base_url, token: None, timeouts: ApiTimeouts::default() }
    }

    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.map(|t| t.trim().to_string()).filter(|t| !t.is_empty());
        self
    }

    #[must_use]
    pub fn with_timeouts(mut self, timeouts: ApiTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Reject base URLs that are not absolute `http`/`https` URLs and zero
    /// timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ApiError> {
        let rest = self
            .base_url
            .strip_prefix("http://")
            .or_else(|| self.base_url.strip_prefix("https://"))
            .ok_or_else(|| ApiError::Config(format!("base URL must start with http:// or https://: {}", self.base_url)))?;
        if rest.is_empty() || rest.starts_with('/') {
            return Err(ApiError::Config(format!("base URL has no host: {}", self.base_url)));
        }
        if self.timeouts.request_secs == 0 || self.timeouts.connect_secs == 0 {
            return Err(ApiError::Config("timeouts must be at least one second".into()));
        }
        Ok(())
    }

    /// Absolute URL for an endpoint path such as `/agent/chat`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
