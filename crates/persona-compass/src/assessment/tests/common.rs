use std::sync::Arc;

use axum::Router;

use crate::assessment::{assessment_router, AssessmentService};
use crate::test_support::{
    personalities, questions, MemoryPersonalities, MemoryQuestions, MemoryResults,
};

pub(super) type MemoryAssessment =
    AssessmentService<MemoryQuestions, MemoryPersonalities, MemoryResults>;

pub(super) struct Fixture {
    pub(super) questions: Arc<MemoryQuestions>,
    pub(super) results: Arc<MemoryResults>,
    pub(super) service: Arc<MemoryAssessment>,
}

impl Fixture {
    pub(super) fn new() -> Self {
        let questions = Arc::new(MemoryQuestions::with(questions()));
        let catalog = Arc::new(MemoryPersonalities::with(personalities()));
        let results = Arc::new(MemoryResults::default());
        let service = Arc::new(AssessmentService::new(
            questions.clone(),
            catalog,
            results.clone(),
        ));
        Self {
            questions,
            results,
            service,
        }
    }

    pub(super) fn router(&self) -> Router {
        assessment_router(self.service.clone())
    }
}
