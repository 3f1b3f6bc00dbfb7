use crate::access::UserId;
use crate::personalities::PersonalityId;
use crate::repository::RepositoryError;

use super::domain::{Question, QuestionId, UserResult};

/// Question storage so the service module can be exercised in isolation.
pub trait QuestionCatalog: Send + Sync {
    fn list(&self) -> Result<Vec<Question>, RepositoryError>;
    /// Fails with `Conflict` when the id or either text is already present.
    fn insert(&self, question: Question) -> Result<Question, RepositoryError>;
    /// Fails with `NotFound` for unknown ids and `Conflict` for duplicated texts.
    fn update(&self, question: Question) -> Result<(), RepositoryError>;
    fn remove(&self, id: &QuestionId) -> Result<Option<Question>, RepositoryError>;
}

/// Per-user questionnaire outcomes.
pub trait ResultStore: Send + Sync {
    fn find_by_user(&self, user_id: &UserId) -> Result<Option<UserResult>, RepositoryError>;
    /// Create or overwrite the user's result in one step; never stores a second record.
    fn upsert(
        &self,
        user_id: &UserId,
        personality_id: &PersonalityId,
    ) -> Result<UserResult, RepositoryError>;
}
