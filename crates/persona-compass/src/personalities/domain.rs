use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PersonalityId(pub String);

impl fmt::Display for PersonalityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TagId(pub String);

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stored description for one combined `holland+mbti` code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalityDescription {
    pub id: PersonalityId,
    pub code: String,
    pub english_description: String,
    pub arabic_description: String,
    #[serde(default)]
    pub tags: Vec<TagId>,
}

impl PersonalityDescription {
    pub fn description(&self, language: Language) -> &str {
        match language {
            Language::En => &self.english_description,
            Language::Ar => &self.arabic_description,
        }
    }

    pub fn has_tag(&self, tag_id: &TagId) -> bool {
        self.tags.contains(tag_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

pub const TAG_NAME_MIN: usize = 3;
pub const TAG_NAME_MAX: usize = 25;

/// Tags are stored trimmed and uppercased.
pub fn normalize_tag_name(raw: &str) -> Result<String, TagNameError> {
    let name = raw.trim().to_uppercase();
    let length = name.chars().count();
    if length < TAG_NAME_MIN {
        return Err(TagNameError::TooShort);
    }
    if length > TAG_NAME_MAX {
        return Err(TagNameError::TooLong);
    }
    Ok(name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TagNameError {
    #[error("tag name must be at least {min} characters", min = TAG_NAME_MIN)]
    TooShort,
    #[error("tag name must be at most {max} characters", max = TAG_NAME_MAX)]
    TooLong,
}

/// Description language for listing responses. Anything other than `ar` reads as English.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ar,
    #[default]
    #[serde(other)]
    En,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PersonalityFilter {
    #[serde(default)]
    pub code: Option<String>,
}

impl PersonalityFilter {
    /// Case-insensitive substring match on the code; `+` is matched literally.
    pub fn matches(&self, personality: &PersonalityDescription) -> bool {
        match self.code.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => personality
                .code
                .to_uppercase()
                .contains(&needle.to_uppercase()),
            _ => true,
        }
    }
}

/// Localized listing entry with tag names resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonalityView {
    pub id: PersonalityId,
    pub code: String,
    pub description: String,
    pub tags: Vec<Tag>,
}

impl PersonalityView {
    pub fn build(personality: &PersonalityDescription, language: Language, tags: &[Tag]) -> Self {
        let tags = personality
            .tags
            .iter()
            .filter_map(|tag_id| tags.iter().find(|tag| &tag.id == tag_id).cloned())
            .collect();

        Self {
            id: personality.id.clone(),
            code: personality.code.clone(),
            description: personality.description(language).to_string(),
            tags,
        }
    }
}
