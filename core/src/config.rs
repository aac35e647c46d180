//! Base URLs for the two hosts the client talks to.

use serde::Deserialize;

use crate::error::ApiError;

pub const DEFAULT_API_BASE_URL: &str = "https://www.duolingo.com";
pub const DEFAULT_DICTIONARY_BASE_URL: &str = "https://d2.duolingo.com";

/// Where requests are sent. Missing fields fall back to the public hosts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub dictionary_base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            dictionary_base_url: DEFAULT_DICTIONARY_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ApiError> {
        serde_json::from_str(raw).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn with_api_base_url(mut self, url: &str) -> Self {
        self.api_base_url = url.to_string();
        self
    }

    pub fn with_dictionary_base_url(mut self, url: &str) -> Self {
        self.dictionary_base_url = url.to_string();
        self
    }
}
