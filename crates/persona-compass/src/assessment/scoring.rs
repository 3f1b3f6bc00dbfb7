use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use super::domain::{Answer, HollandAttribute, MbtiAttribute, Question, QuestionId};

/// Running MBTI totals, one slot per letter.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MbtiScores([f64; 8]);

impl MbtiScores {
    pub fn get(&self, attribute: MbtiAttribute) -> f64 {
        self.0[attribute.index()]
    }

    pub fn add(&mut self, attribute: MbtiAttribute, value: f64) {
        self.0[attribute.index()] += value;
    }

    /// Pick one letter per axis; the first-listed letter (E, S, T, J) keeps ties.
    pub fn resolve(&self) -> MbtiType {
        MbtiType(MbtiAttribute::AXES.map(|(first, second)| {
            if self.get(second) > self.get(first) {
                second
            } else {
                first
            }
        }))
    }
}

impl FromIterator<(MbtiAttribute, f64)> for MbtiScores {
    fn from_iter<T: IntoIterator<Item = (MbtiAttribute, f64)>>(iter: T) -> Self {
        let mut scores = Self::default();
        for (attribute, value) in iter {
            scores.add(attribute, value);
        }
        scores
    }
}

/// Running Holland totals, one slot per category.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HollandScores([f64; 6]);

impl HollandScores {
    pub fn get(&self, attribute: HollandAttribute) -> f64 {
        self.0[attribute.index()]
    }

    pub fn add(&mut self, attribute: HollandAttribute, value: f64) {
        self.0[attribute.index()] += value;
    }

    /// Top three categories by score. The sort is stable so equal scores keep declaration
    /// order; the chosen three are then written alphabetically.
    pub fn resolve(&self) -> HollandCode {
        let mut ranked = HollandAttribute::ALL;
        ranked.sort_by(|a, b| {
            self.get(*b)
                .partial_cmp(&self.get(*a))
                .unwrap_or(Ordering::Equal)
        });
        HollandCode::from_selection([ranked[0], ranked[1], ranked[2]])
    }
}

impl FromIterator<(HollandAttribute, f64)> for HollandScores {
    fn from_iter<T: IntoIterator<Item = (HollandAttribute, f64)>>(iter: T) -> Self {
        let mut scores = Self::default();
        for (attribute, value) in iter {
            scores.add(attribute, value);
        }
        scores
    }
}

/// Both accumulators for a single scoring request.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoreSheet {
    pub mbti: MbtiScores,
    pub holland: HollandScores,
}

impl ScoreSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, question: &Question, value: f64) {
        self.mbti.add(question.mbti_attribute, value);
        self.holland.add(question.holland_attribute, value);
    }

    pub fn resolve(&self) -> PersonalityCode {
        PersonalityCode {
            holland: self.holland.resolve(),
            mbti: self.mbti.resolve(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("question '{0}' does not exist")]
    UnknownQuestion(QuestionId),
}

/// Fold answers into a fresh score sheet. Any unknown question id fails the whole request.
pub fn aggregate(answers: &[Answer], questions: &[Question]) -> Result<ScoreSheet, ScoringError> {
    let index: HashMap<&QuestionId, &Question> = questions
        .iter()
        .map(|question| (&question.id, question))
        .collect();

    let mut sheet = ScoreSheet::new();
    for answer in answers {
        let question = index
            .get(&answer.question_id)
            .ok_or_else(|| ScoringError::UnknownQuestion(answer.question_id.clone()))?;
        sheet.record(question, answer.value);
    }

    Ok(sheet)
}

/// Four-letter MBTI type in axis order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MbtiType([MbtiAttribute; 4]);

impl MbtiType {
    pub fn letters(&self) -> [MbtiAttribute; 4] {
        self.0
    }
}

impl fmt::Display for MbtiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|letter| write!(f, "{letter}"))
    }
}

/// Three distinct Holland categories, kept in alphabetical letter order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HollandCode([HollandAttribute; 3]);

impl HollandCode {
    pub fn from_selection(mut selection: [HollandAttribute; 3]) -> Self {
        selection.sort_by_key(|attribute| attribute.letter());
        Self(selection)
    }

    pub fn letters(&self) -> [HollandAttribute; 3] {
        self.0
    }
}

impl fmt::Display for HollandCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|letter| write!(f, "{letter}"))
    }
}

/// Lookup key for personality descriptions, rendered as `{holland}+{mbti}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PersonalityCode {
    pub holland: HollandCode,
    pub mbti: MbtiType,
}

impl fmt::Display for PersonalityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.holland, self.mbti)
    }
}

impl Serialize for PersonalityCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid personality code '{code}': {reason}")]
pub struct PersonalityCodeError {
    pub code: String,
    pub reason: &'static str,
}

impl FromStr for PersonalityCode {
    type Err = PersonalityCodeError;

    /// Accepts any letter case and any Holland letter order; the result is canonical.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let fail = |reason| PersonalityCodeError {
            code: value.to_string(),
            reason,
        };

        let (holland_raw, mbti_raw) = value
            .trim()
            .split_once('+')
            .ok_or_else(|| fail("expected '<holland>+<mbti>'"))?;

        let holland: Vec<HollandAttribute> = holland_raw
            .chars()
            .map(HollandAttribute::from_letter)
            .collect::<Option<_>>()
            .ok_or_else(|| fail("unknown Holland letter"))?;
        let holland: [HollandAttribute; 3] = holland
            .try_into()
            .map_err(|_| fail("Holland part must have three letters"))?;
        if holland[0] == holland[1] || holland[0] == holland[2] || holland[1] == holland[2] {
            return Err(fail("Holland letters must be distinct"));
        }

        let mbti: Vec<char> = mbti_raw.chars().collect();
        if mbti.len() != MbtiAttribute::AXES.len() {
            return Err(fail("MBTI part must have four letters"));
        }
        let mut letters = [MbtiAttribute::Extraversion; 4];
        for (slot, (letter, (first, second))) in
            mbti.into_iter().zip(MbtiAttribute::AXES).enumerate()
        {
            letters[slot] = match MbtiAttribute::from_letter(letter) {
                Some(attribute) if attribute == first || attribute == second => attribute,
                _ => return Err(fail("MBTI letter does not belong to its axis")),
            };
        }

        Ok(Self {
            holland: HollandCode::from_selection(holland),
            mbti: MbtiType(letters),
        })
    }
}
