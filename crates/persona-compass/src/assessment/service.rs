use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use crate::access::UserId;
use crate::personalities::{PersonalityCatalog, PersonalityDescription};
use crate::repository::RepositoryError;

use super::domain::{Answer, Question, QuestionDraft, QuestionId, QuestionValidationError};
use super::repository::{QuestionCatalog, ResultStore};
use super::scoring::{aggregate, ScoreSheet, ScoringError};

/// Service composing the question catalog, personality lookup, and result store.
pub struct AssessmentService<Q, P, R> {
    questions: Arc<Q>,
    personalities: Arc<P>,
    results: Arc<R>,
    sequence: AtomicU64,
}

/// Totals and matched description produced by one scoring pass.
#[derive(Debug, Clone)]
pub struct ScoredQuestionnaire {
    pub sheet: ScoreSheet,
    pub personality: PersonalityDescription,
}

impl<Q, P, R> AssessmentService<Q, P, R>
where
    Q: QuestionCatalog + 'static,
    P: PersonalityCatalog + 'static,
    R: ResultStore + 'static,
{
    pub fn new(questions: Arc<Q>, personalities: Arc<P>, results: Arc<R>) -> Self {
        Self {
            questions,
            personalities,
            results,
            sequence: AtomicU64::new(1),
        }
    }

    /// Next generated id not already used by a stored or imported question.
    fn next_question_id(&self) -> Result<QuestionId, AssessmentError> {
        let taken: HashSet<QuestionId> = self
            .questions
            .list()?
            .into_iter()
            .map(|question| question.id)
            .collect();
        loop {
            let id = self.sequence.fetch_add(1, Ordering::Relaxed);
            let candidate = QuestionId(format!("question-{id:06}"));
            if !taken.contains(&candidate) {
                return Ok(candidate);
            }
        }
    }

    /// Score a completed questionnaire and record it as the user's current result.
    ///
    /// Nothing is persisted unless every answer references a known question and the
    /// resolved code has a stored description.
    pub fn score_answers(
        &self,
        user_id: &UserId,
        answers: &[Answer],
    ) -> Result<PersonalityDescription, AssessmentError> {
        Ok(self.score_questionnaire(user_id, answers)?.personality)
    }

    /// Same as [`score_answers`](Self::score_answers), keeping the per-letter totals.
    pub fn score_questionnaire(
        &self,
        user_id: &UserId,
        answers: &[Answer],
    ) -> Result<ScoredQuestionnaire, AssessmentError> {
        let questions = self.questions.list()?;
        let sheet = aggregate(answers, &questions)?;
        let code = sheet.resolve().to_string();

        let personality = match self.personalities.find_by_code(&code)? {
            Some(personality) => personality,
            None => {
                warn!(user = %user_id, %code, "no personality description for resolved code");
                return Err(AssessmentError::PersonalityMissing { code });
            }
        };

        self.results.upsert(user_id, &personality.id)?;
        info!(
            user = %user_id,
            %code,
            answers = answers.len(),
            "questionnaire scored"
        );

        Ok(ScoredQuestionnaire { sheet, personality })
    }

    /// The personality recorded by the user's latest scoring.
    pub fn user_result(&self, user_id: &UserId) -> Result<PersonalityDescription, AssessmentError> {
        let result = self
            .results
            .find_by_user(user_id)?
            .ok_or_else(|| AssessmentError::NoResult(user_id.clone()))?;

        self.personalities
            .find_by_id(&result.personality_id)?
            .ok_or_else(|| AssessmentError::NoResult(user_id.clone()))
    }

    pub fn questions(&self) -> Result<Vec<Question>, AssessmentError> {
        Ok(self.questions.list()?)
    }

    pub fn add_question(&self, draft: QuestionDraft) -> Result<Question, AssessmentError> {
        let draft = draft.normalized()?;
        let question = draft.into_question(self.next_question_id()?);
        let stored = self.questions.insert(question)?;
        info!(question = %stored.id, "question added");
        Ok(stored)
    }

    pub fn update_question(
        &self,
        id: &QuestionId,
        draft: QuestionDraft,
    ) -> Result<Question, AssessmentError> {
        let question = draft.normalized()?.into_question(id.clone());
        match self.questions.update(question.clone()) {
            Ok(()) => {
                info!(question = %id, "question updated");
                Ok(question)
            }
            Err(RepositoryError::NotFound) => Err(AssessmentError::QuestionNotFound(id.clone())),
            Err(other) => Err(other.into()),
        }
    }

    pub fn delete_question(&self, id: &QuestionId) -> Result<Question, AssessmentError> {
        let removed = self
            .questions
            .remove(id)?
            .ok_or_else(|| AssessmentError::QuestionNotFound(id.clone()))?;
        info!(question = %id, "question deleted");
        Ok(removed)
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error("no personality description matches code '{code}'")]
    PersonalityMissing { code: String },
    #[error("user '{0}' does not have a result yet")]
    NoResult(UserId),
    #[error("question '{0}' does not exist")]
    QuestionNotFound(QuestionId),
    #[error(transparent)]
    InvalidQuestion(#[from] QuestionValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
