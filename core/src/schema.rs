//! Raw response bodies as the API sends them.
//!
//! Only the fields the client reads are declared; serde ignores the rest.
//! Anything the API is known to omit for some accounts is defaulted.

use std::collections::HashMap;

use serde::Deserialize;

/// Body of `POST /login`. A rejected login still answers 200 but carries
/// `failure` instead of `user_id`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLoginResponse {
    pub user_id: Option<u64>,
    pub failure: Option<String>,
    pub message: Option<String>,
}

/// Body of `GET /users/{username}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawUser {
    pub id: u64,
    pub username: String,
    pub fullname: Option<String>,
    #[serde(default)]
    pub site_streak: u32,
    #[serde(default)]
    pub streak_extended_today: bool,
    /// Only present when the request was authenticated as this user.
    pub inventory: Option<RawInventory>,
    #[serde(default)]
    pub languages: Vec<RawLanguage>,
    pub learning_language: Option<String>,
    /// Keyed by language id; only languages the user is learning appear.
    #[serde(default)]
    pub language_data: HashMap<String, RawLanguageData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawInventory {
    pub streak_freeze: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLanguage {
    pub language: String,
    pub language_string: String,
    #[serde(default)]
    pub learning: bool,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub points: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLanguageData {
    pub language_string: String,
    #[serde(default)]
    pub skills: Vec<RawSkillRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSkillRef {
    pub id: String,
    pub title: String,
}

/// Body of `GET /api/1/skills/show`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSkill {
    pub id: String,
    pub language: String,
    pub title: String,
    /// Lessons in teaching order.
    #[serde(default)]
    pub path: Vec<RawLesson>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLesson {
    pub words: Option<Vec<String>>,
}

/// Body of the dictionary hints endpoint: word -> candidate translations.
pub type RawHints = HashMap<String, Vec<String>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_user_profile_parses() {
        let raw: RawUser = serde_json::from_str(r#"{"id":1,"username":"bob"}"#).unwrap();
        assert_eq!(raw.username, "bob");
        assert!(raw.fullname.is_none());
        assert!(raw.languages.is_empty());
        assert!(raw.language_data.is_empty());
        assert_eq!(raw.site_streak, 0);
    }

    #[test]
    fn lesson_without_words_parses() {
        let raw: RawSkill = serde_json::from_str(
            r#"{"id":"s1","language":"es","title":"Basics","path":[{"words":["a"]},{}]}"#,
        )
        .unwrap();
        assert_eq!(raw.path.len(), 2);
        assert!(raw.path[1].words.is_none());
    }

    #[test]
    fn rejected_login_parses() {
        let raw: RawLoginResponse =
            serde_json::from_str(r#"{"failure":"invalid_password","message":"Wrong"}"#).unwrap();
        assert_eq!(raw.failure.as_deref(), Some("invalid_password"));
        assert!(raw.user_id.is_none());
    }
}
