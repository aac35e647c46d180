//! Error types for the Duolingo API client.
//!
//! # Design
//! Callers branch on the failure kind, not on message text. Transport-level
//! failures (`Transport`, `HttpError`) are propagated exactly as received.
//! `AuthenticationRequired` and `LanguageNotActive` are raised locally.

use thiserror::Error;

/// Errors returned by `ApiClient` parse methods and the `Duolingo` facade.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received (connection refused, DNS, I/O).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server answered with a status other than the expected one.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// A session-dependent operation was called while logged out.
    #[error("authentication required")]
    AuthenticationRequired,

    /// The fetched profile carries no data for the requested language.
    #[error("language {language} is not active for user {username}")]
    LanguageNotActive { language: String, username: String },

    /// The login endpoint rejected the credentials.
    #[error("login failed: {0}")]
    LoginFailed(String),

    /// The response body could not be deserialized into the expected shape.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// A request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

impl ApiError {
    /// True for network failures and non-success statuses.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_) | ApiError::HttpError { .. })
    }
}
