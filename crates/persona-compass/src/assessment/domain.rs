use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::access::UserId;
use crate::personalities::PersonalityId;

/// Identifier wrapper for questionnaire items.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(pub String);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// MBTI preference letters, listed axis by axis with the tie-winning letter first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MbtiAttribute {
    #[serde(rename = "E")]
    Extraversion,
    #[serde(rename = "I")]
    Introversion,
    #[serde(rename = "S")]
    Sensing,
    #[serde(rename = "N")]
    Intuition,
    #[serde(rename = "T")]
    Thinking,
    #[serde(rename = "F")]
    Feeling,
    #[serde(rename = "J")]
    Judging,
    #[serde(rename = "P")]
    Perceiving,
}

impl MbtiAttribute {
    pub const ALL: [MbtiAttribute; 8] = [
        MbtiAttribute::Extraversion,
        MbtiAttribute::Introversion,
        MbtiAttribute::Sensing,
        MbtiAttribute::Intuition,
        MbtiAttribute::Thinking,
        MbtiAttribute::Feeling,
        MbtiAttribute::Judging,
        MbtiAttribute::Perceiving,
    ];

    /// Axis pairs in type-string order: energy, perception, judgment, lifestyle.
    pub const AXES: [(MbtiAttribute, MbtiAttribute); 4] = [
        (MbtiAttribute::Extraversion, MbtiAttribute::Introversion),
        (MbtiAttribute::Sensing, MbtiAttribute::Intuition),
        (MbtiAttribute::Thinking, MbtiAttribute::Feeling),
        (MbtiAttribute::Judging, MbtiAttribute::Perceiving),
    ];

    pub const fn letter(self) -> char {
        match self {
            MbtiAttribute::Extraversion => 'E',
            MbtiAttribute::Introversion => 'I',
            MbtiAttribute::Sensing => 'S',
            MbtiAttribute::Intuition => 'N',
            MbtiAttribute::Thinking => 'T',
            MbtiAttribute::Feeling => 'F',
            MbtiAttribute::Judging => 'J',
            MbtiAttribute::Perceiving => 'P',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        let letter = letter.to_ascii_uppercase();
        Self::ALL.into_iter().find(|attr| attr.letter() == letter)
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for MbtiAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for MbtiAttribute {
    type Err = AttributeParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        single_letter(value)
            .and_then(Self::from_letter)
            .ok_or_else(|| AttributeParseError::Mbti(value.to_string()))
    }
}

/// Holland (RIASEC) interest categories in declaration order; ties rank earlier variants first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HollandAttribute {
    #[serde(rename = "R")]
    Realistic,
    #[serde(rename = "I")]
    Investigative,
    #[serde(rename = "A")]
    Artistic,
    #[serde(rename = "S")]
    Social,
    #[serde(rename = "E")]
    Enterprising,
    #[serde(rename = "C")]
    Conventional,
}

impl HollandAttribute {
    pub const ALL: [HollandAttribute; 6] = [
        HollandAttribute::Realistic,
        HollandAttribute::Investigative,
        HollandAttribute::Artistic,
        HollandAttribute::Social,
        HollandAttribute::Enterprising,
        HollandAttribute::Conventional,
    ];

    pub const fn letter(self) -> char {
        match self {
            HollandAttribute::Realistic => 'R',
            HollandAttribute::Investigative => 'I',
            HollandAttribute::Artistic => 'A',
            HollandAttribute::Social => 'S',
            HollandAttribute::Enterprising => 'E',
            HollandAttribute::Conventional => 'C',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        let letter = letter.to_ascii_uppercase();
        Self::ALL.into_iter().find(|attr| attr.letter() == letter)
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for HollandAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for HollandAttribute {
    type Err = AttributeParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        single_letter(value)
            .and_then(Self::from_letter)
            .ok_or_else(|| AttributeParseError::Holland(value.to_string()))
    }
}

fn single_letter(value: &str) -> Option<char> {
    let mut chars = value.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) => Some(letter),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttributeParseError {
    #[error("'{0}' is not an MBTI letter (E, I, S, N, T, F, J, P)")]
    Mbti(String),
    #[error("'{0}' is not a Holland letter (R, I, A, S, E, C)")]
    Holland(String),
}

/// Questionnaire item; each one feeds exactly one MBTI letter and one Holland category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub question_en: String,
    pub question_ar: String,
    pub mbti_attribute: MbtiAttribute,
    pub holland_attribute: HollandAttribute,
}

pub const MIN_QUESTION_LENGTH: usize = 10;

/// Admin-supplied question content before an identifier is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub question_en: String,
    pub question_ar: String,
    pub mbti_attribute: MbtiAttribute,
    pub holland_attribute: HollandAttribute,
}

impl QuestionDraft {
    /// Trim both texts and enforce the minimum length.
    pub fn normalized(self) -> Result<Self, QuestionValidationError> {
        let question_en = self.question_en.trim().to_string();
        let question_ar = self.question_ar.trim().to_string();

        if question_en.chars().count() < MIN_QUESTION_LENGTH {
            return Err(QuestionValidationError::TooShort {
                field: "question_en",
            });
        }
        if question_ar.chars().count() < MIN_QUESTION_LENGTH {
            return Err(QuestionValidationError::TooShort {
                field: "question_ar",
            });
        }

        Ok(Self {
            question_en,
            question_ar,
            ..self
        })
    }

    pub fn into_question(self, id: QuestionId) -> Question {
        Question {
            id,
            question_en: self.question_en,
            question_ar: self.question_ar,
            mbti_attribute: self.mbti_attribute,
            holland_attribute: self.holland_attribute,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionValidationError {
    #[error("{field} must be at least {min} characters long", min = MIN_QUESTION_LENGTH)]
    TooShort { field: &'static str },
}

/// Caller-supplied answer; the value is added to both accumulators as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: QuestionId,
    pub value: f64,
}

/// The stored questionnaire outcome; at most one per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResult {
    pub user_id: UserId,
    pub personality_id: PersonalityId,
}
