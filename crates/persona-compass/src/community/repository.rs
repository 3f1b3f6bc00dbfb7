use crate::access::UserId;
use crate::repository::RepositoryError;

use super::domain::{Comment, CommentId};

pub trait CommentStore: Send + Sync {
    fn insert(&self, comment: Comment) -> Result<Comment, RepositoryError>;
    fn update(&self, comment: Comment) -> Result<(), RepositoryError>;
    fn find(&self, id: &CommentId) -> Result<Option<Comment>, RepositoryError>;
    fn remove(&self, id: &CommentId) -> Result<Option<Comment>, RepositoryError>;
    /// All comments, or only those written by `author` when given. Unordered.
    fn list(&self, author: Option<&UserId>) -> Result<Vec<Comment>, RepositoryError>;
}
