//! Domain types returned by the client.
//!
//! # Design
//! These are the reshaped, caller-facing views. The raw wire shapes live in
//! `schema`; `mapping` converts one into the other. Keeping them apart means
//! a change in the undocumented API only touches `schema` and `mapping`.

use serde::{Deserialize, Serialize};

/// A user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    /// Full name when the profile has one, otherwise the username.
    pub display_name: String,
    pub streak: Streak,
    /// Languages currently being learned, highest points first.
    pub languages: Vec<LanguageSummary>,
    pub active_language: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    /// Consecutive days.
    pub length: u32,
    /// Whether today already counts toward the streak.
    pub extended: bool,
    /// Whether a streak freeze is equipped.
    pub freeze: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageSummary {
    pub id: String,
    pub name: String,
    pub level: u32,
    pub points: u64,
}

/// A language as seen through one of its learners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub id: String,
    pub name: String,
    pub skills: Vec<SkillSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSummary {
    pub id: String,
    pub title: String,
}

/// A skill with all vocabulary taught across its lessons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub language: String,
    pub title: String,
    pub words: Vec<String>,
}

/// One entry per requested word, in request order. `None` means the
/// dictionary returned nothing for that word.
pub type Translations = Vec<Option<Vec<String>>>;
