//! Questionnaire catalog, answer scoring, and per-user results.
//!
//! Answers are folded into MBTI and Holland accumulators, resolved into a combined
//! `holland+mbti` code, and matched against the personality catalog. The matched
//! description becomes the user's single stored result.

pub mod domain;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Answer, AttributeParseError, HollandAttribute, MbtiAttribute, Question, QuestionDraft,
    QuestionId, QuestionValidationError, UserResult,
};
pub use repository::{QuestionCatalog, ResultStore};
pub use router::{assessment_router, CalculateRequest};
pub use scoring::{
    aggregate, HollandCode, HollandScores, MbtiScores, MbtiType, PersonalityCode,
    PersonalityCodeError, ScoreSheet, ScoringError,
};
pub use service::{AssessmentError, AssessmentService, ScoredQuestionnaire};
