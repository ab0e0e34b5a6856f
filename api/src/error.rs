//! Error type for every backend call.

/// Errors produced by [`crate::ApiClient`] operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A configuration value is missing or malformed.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The request never produced a response (DNS, connect, timeout, ...).
    #[error("request failed: {0}")]
    Request(String),

    /// The login endpoint rejected the credentials.
    #[error("Invalid email or password. Please check your credentials and try again.")]
    InvalidCredentials,

    /// Any other endpoint answered 401; the token is missing or expired.
    #[error("not authenticated: log in again")]
    Unauthorized,

    /// The backend returned a non-success status.
    #[error("server returned status {status}{}", status_suffix(.message.as_deref()))]
    Status { status: u16, message: Option<String> },

    /// The response body could not be decoded into the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),
}

impl ApiError {
    /// Human-readable message supplied by the backend, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Whether the caller should re-authenticate before retrying.
    #[must_use]
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::InvalidCredentials)
    }
}

fn status_suffix(message: Option<&str>) -> String {
    message.map(|m| format!(": {m}")).unwrap_or_default()
}
