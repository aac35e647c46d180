//! Credentials of the logged-in user.

use std::fmt;

/// A live login: who is signed in and the bearer token the server issued.
///
/// Only `Duolingo::login` creates one. The token never appears in `Debug`
/// output.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    username: String,
    user_id: u64,
    token: String,
}

impl Session {
    pub(crate) fn new(username: String, user_id: u64, token: String) -> Self {
        Self {
            username,
            user_id,
            token,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn user_id(&self) -> u64 {
        self.user_id
    }

    /// `("Authorization", "Bearer {token}")`.
    pub fn authorization_header(&self) -> (String, String) {
        ("Authorization".to_string(), format!("Bearer {}", self.token))
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("username", &self.username)
            .field("user_id", &self.user_id)
            .field("token", &"<redacted>")
            .finish()
    }
}
