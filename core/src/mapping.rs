//! Pure conversions from raw response bodies to domain types.

use crate::error::ApiError;
use crate::schema::{RawHints, RawSkill, RawUser};
use crate::types::{Language, LanguageSummary, Skill, SkillSummary, Streak, Translations, User};

pub fn map_user(raw: RawUser) -> User {
    let display_name = match raw.fullname {
        Some(name) if !name.is_empty() => name,
        _ => raw.username.clone(),
    };

    let mut languages: Vec<LanguageSummary> = raw
        .languages
        .into_iter()
        .filter(|l| l.learning)
        .map(|l| LanguageSummary {
            id: l.language,
            name: l.language_string,
            level: l.level,
            points: l.points,
        })
        .collect();
    // sort_by is stable: equal points keep response order.
    languages.sort_by(|a, b| b.points.cmp(&a.points));

    let freeze = raw
        .inventory
        .as_ref()
        .is_some_and(|inv| inv.streak_freeze.is_some());

    User {
        id: raw.id,
        username: raw.username,
        display_name,
        streak: Streak {
            length: raw.site_streak,
            extended: raw.streak_extended_today,
            freeze,
        },
        languages,
        active_language: raw.learning_language,
    }
}

/// Extracts one language's skill tree from a learner's profile.
pub fn map_language(mut raw: RawUser, language_id: &str, username: &str) -> Result<Language, ApiError> {
    let data = raw
        .language_data
        .remove(language_id)
        .ok_or_else(|| ApiError::LanguageNotActive {
            language: language_id.to_string(),
            username: username.to_string(),
        })?;

    Ok(Language {
        id: language_id.to_string(),
        name: data.language_string,
        skills: data
            .skills
            .into_iter()
            .map(|s| SkillSummary {
                id: s.id,
                title: s.title,
            })
            .collect(),
    })
}

/// Lessons without a `words` list are skipped; the API omits it on some
/// lessons for no documented reason.
pub fn map_skill(raw: RawSkill) -> Skill {
    let words = raw
        .path
        .into_iter()
        .filter_map(|lesson| lesson.words)
        .flatten()
        .collect();

    Skill {
        id: raw.id,
        language: raw.language,
        title: raw.title,
        words,
    }
}

/// Re-projects the hints map onto the requested word order.
pub fn align_translations<S: AsRef<str>>(words: &[S], hints: &RawHints) -> Translations {
    words
        .iter()
        .map(|word| hints.get(word.as_ref()).cloned())
        .collect()
}
