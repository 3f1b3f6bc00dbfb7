use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::access::UserId;
use crate::accounts::AccountDirectory;
use crate::pagination::{Page, PageRequest};
use crate::repository::RepositoryError;

use super::domain::{normalize_body, Comment, CommentBodyError, CommentId, CommentSort, CommentView};
use super::moderation::{ModerationError, ProfanityFilter};
use super::repository::CommentStore;

/// Comment board: authoring, moderation, and listing with author names.
pub struct CommentService<C, D> {
    comments: Arc<C>,
    accounts: Arc<D>,
    filter: ProfanityFilter,
}

static COMMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_comment_id() -> CommentId {
    let id = COMMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    CommentId(format!("comment-{id:06}"))
}

impl<C, D> CommentService<C, D>
where
    C: CommentStore + 'static,
    D: AccountDirectory + 'static,
{
    pub fn new(comments: Arc<C>, accounts: Arc<D>, filter: ProfanityFilter) -> Self {
        Self {
            comments,
            accounts,
            filter,
        }
    }

    pub fn create(&self, author: &UserId, body: &str) -> Result<CommentView, CommentError> {
        let body = self.screen(author, body)?;
        let now = Utc::now();
        let comment = self.comments.insert(Comment {
            id: next_comment_id(),
            body,
            created_by: author.clone(),
            created_at: now,
            updated_at: now,
        })?;
        info!(comment = %comment.id, author = %author, "comment created");

        let mut names = HashMap::new();
        Ok(self.view(comment, &mut names)?)
    }

    pub fn list_all(
        &self,
        page: &PageRequest,
        sort: CommentSort,
    ) -> Result<Page<CommentView>, CommentError> {
        self.listing(None, page, sort)
    }

    pub fn list_for_user(
        &self,
        author: &UserId,
        page: &PageRequest,
        sort: CommentSort,
    ) -> Result<Page<CommentView>, CommentError> {
        self.listing(Some(author), page, sort)
    }

    pub fn update_own(
        &self,
        author: &UserId,
        id: &CommentId,
        body: &str,
    ) -> Result<CommentView, CommentError> {
        let mut comment = self.owned(author, id)?;
        comment.body = self.screen(author, body)?;
        comment.updated_at = Utc::now();
        self.comments.update(comment.clone())?;
        info!(comment = %id, author = %author, "comment updated");

        let mut names = HashMap::new();
        Ok(self.view(comment, &mut names)?)
    }

    pub fn delete_own(&self, author: &UserId, id: &CommentId) -> Result<(), CommentError> {
        self.owned(author, id)?;
        self.comments.remove(id)?;
        info!(comment = %id, author = %author, "comment deleted by author");
        Ok(())
    }

    pub fn moderator_delete(&self, id: &CommentId) -> Result<Comment, CommentError> {
        let removed = self
            .comments
            .remove(id)?
            .ok_or_else(|| CommentError::NotFound(id.clone()))?;
        info!(comment = %id, author = %removed.created_by, "comment removed by moderator");
        Ok(removed)
    }

    fn screen(&self, author: &UserId, body: &str) -> Result<String, CommentError> {
        let body = normalize_body(body)?;
        if let Err(err) = self.filter.check(&body) {
            warn!(author = %author, "comment rejected by moderation");
            return Err(err.into());
        }
        Ok(body)
    }

    fn owned(&self, author: &UserId, id: &CommentId) -> Result<Comment, CommentError> {
        let comment = self
            .comments
            .find(id)?
            .ok_or_else(|| CommentError::NotFound(id.clone()))?;
        if &comment.created_by != author {
            return Err(CommentError::NotAuthor(id.clone()));
        }
        Ok(comment)
    }

    fn listing(
        &self,
        author: Option<&UserId>,
        page: &PageRequest,
        sort: CommentSort,
    ) -> Result<Page<CommentView>, CommentError> {
        let mut comments = self.comments.list(author)?;
        sort.apply(&mut comments);
        let page = page.slice(comments);

        let mut names = HashMap::new();
        let items = page
            .items
            .into_iter()
            .map(|comment| self.view(comment, &mut names))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page {
            items,
            total: page.total,
        })
    }

    fn view(
        &self,
        comment: Comment,
        names: &mut HashMap<UserId, Option<String>>,
    ) -> Result<CommentView, RepositoryError> {
        let author = match names.get(&comment.created_by) {
            Some(name) => name.clone(),
            None => {
                let name = self
                    .accounts
                    .find(&comment.created_by)?
                    .map(|account| account.user_name);
                names.insert(comment.created_by.clone(), name.clone());
                name
            }
        };

        Ok(CommentView {
            id: comment.id,
            comment: comment.body,
            created_at: comment.created_at,
            author,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommentError {
    #[error("comment '{0}' does not exist")]
    NotFound(CommentId),
    #[error("comment '{0}' belongs to another user")]
    NotAuthor(CommentId),
    #[error(transparent)]
    InvalidBody(#[from] CommentBodyError),
    #[error(transparent)]
    Moderation(#[from] ModerationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
