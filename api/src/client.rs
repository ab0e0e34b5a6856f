//! HTTP client for the Career AI backend.
//!
//! Thin wrapper over `reqwest`: every call goes through [`ApiClient::request`],
//! which attaches the bearer token, maps status codes onto [`ApiError`], and
//! strips the response envelope. Status mapping and body parsing are pure
//! functions so they can be tested without a server.

use std::time::Duration;

use reqwest::Method;
use serde_json::{Value, json};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::types::{AuthResponse, HistoryEntry, Resource, User, decode, error_message, history_entries, reply_text, unwrap_data};

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

const LOGIN_PATH: &str = "/auth/login";
const REGISTER_PATH: &str = "/auth/register";
const ME_PATH: &str = "/auth/me";
const LOGOUT_PATH: &str = "/auth/logout";
const CHAT_PATH: &str = "/agent/chat";
const CHAT_HISTORY_PATH: &str = "/agent/chat/history";
const CHAT_CLEAR_PATH: &str = "/agent/chat/clear";

// =============================================================================
// CLIENT
// =============================================================================

pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Build a client from validated settings.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] for an invalid config and
    /// [`ApiError::HttpClientBuild`] when `reqwest` cannot be initialized.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.config.token.as_deref()
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.config.token = token;
    }

    // -------------------------------------------------------------------------
    // Auth
    // -------------------------------------------------------------------------

    /// Log in and keep the issued token for later calls.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let body = json!({ "email": email, "password": password });
        let auth: AuthResponse = decode(self.request(Method::POST, LOGIN_PATH, Some(&body)).await?)?;
        self.config.token = Some(auth.token.clone());
        Ok(auth)
    }

    /// Create an account and keep the issued token for later calls.
    pub async fn register(&mut self, name: &str, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let body = json!({ "name": name, "email": email, "password": password });
        let auth: AuthResponse = decode(self.request(Method::POST, REGISTER_PATH, Some(&body)).await?)?;
        self.config.token = Some(auth.token.clone());
        Ok(auth)
    }

    pub async fn me(&self) -> Result<User, ApiError> {
        let data = self.request(Method::GET, ME_PATH, None).await?;
        // Some deployments answer `{ user: {...} }`, others the bare user.
        match data.get("user") {
            Some(user) if user.is_object() => decode(user.clone()),
            _ => decode(data),
        }
    }

    /// End the server session. The local token is dropped whether or not
    /// the request succeeds.
    pub async fn logout(&mut self) -> Result<(), ApiError> {
        let result = self.request(Method::POST, LOGOUT_PATH, None).await;
        self.config.token = None;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "logout request failed; local token cleared");
        }
        result.map(|_| ())
    }

    // -------------------------------------------------------------------------
    // Agent chat
    // -------------------------------------------------------------------------

    /// Send one chat message and return the assistant's reply text.
    pub async fn send_chat(&self, message: &str) -> Result<String, ApiError> {
        let body = json!({ "message": message });
        let data = self.request(Method::POST, CHAT_PATH, Some(&body)).await?;
        Ok(reply_text(&data))
    }

    pub async fn chat_history(&self) -> Result<Vec<HistoryEntry>, ApiError> {
        history_entries(self.request(Method::GET, CHAT_HISTORY_PATH, None).await?)
    }

    pub async fn clear_chat_history(&self) -> Result<(), ApiError> {
        self.request(Method::POST, CHAT_CLEAR_PATH, None).await.map(|_| ())
    }

    // -------------------------------------------------------------------------
    // Listings
    // -------------------------------------------------------------------------

    /// Fetch a read-only listing as raw JSON, envelope removed.
    pub async fn fetch(&self, resource: Resource) -> Result<Value, ApiError> {
        self.request(Method::GET, resource.path(), None).await
    }

    async fn request(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value, ApiError> {
        let url = self.config.url(path);
        tracing::debug!(%method, %url, "api request");

        let mut builder = self.http.request(method, &url);
        if let Some(token) = self.token() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| ApiError::Request(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| ApiError::Request(e.to_string()))?;

        check_status(path, status, &text)?;
        parse_body(&text).map(unwrap_data)
    }
}

// =============================================================================
// RESPONSE HANDLING
// =============================================================================

/// Map a non-success status onto an error. 401 from the login endpoint means
/// bad credentials; anywhere else it means the session is gone.
fn check_status(path: &str, status: u16, body: &str) -> Result<(), ApiError> {
    if (200..300).contains(&status) {
        return Ok(());
    }
    if status == 401 {
        return Err(if path == LOGIN_PATH { ApiError::InvalidCredentials } else { ApiError::Unauthorized });
    }
    tracing::debug!(status, path, "api request failed");
    Err(ApiError::Status { status, message: error_message(body) })
}

/// Empty bodies (204, bare 200) decode as `null`.
fn parse_body(text: &str) -> Result<Value, ApiError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}
