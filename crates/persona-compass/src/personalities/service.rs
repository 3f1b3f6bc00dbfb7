use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::info;

use crate::pagination::{Page, PageRequest};
use crate::repository::RepositoryError;

use super::domain::{
    normalize_tag_name, Language, PersonalityFilter, PersonalityId, PersonalityView, Tag, TagId,
    TagNameError,
};
use super::repository::PersonalityCatalog;

/// Admin-facing catalog operations over personalities and tags.
pub struct PersonalityService<P> {
    catalog: Arc<P>,
}

static TAG_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_tag_id() -> TagId {
    let id = TAG_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    TagId(format!("tag-{id:06}"))
}

impl<P> PersonalityService<P>
where
    P: PersonalityCatalog + 'static,
{
    pub fn new(catalog: Arc<P>) -> Self {
        Self { catalog }
    }

    pub fn list(
        &self,
        filter: &PersonalityFilter,
        page: &PageRequest,
        language: Language,
    ) -> Result<Page<PersonalityView>, PersonalityError> {
        let tags = self.catalog.tags()?;
        let matching = self
            .catalog
            .list()?
            .into_iter()
            .filter(|personality| filter.matches(personality))
            .collect();

        Ok(page
            .slice(matching)
            .map(|personality| PersonalityView::build(&personality, language, &tags)))
    }

    pub fn add_tag(
        &self,
        personality_id: &PersonalityId,
        tag_id: &TagId,
    ) -> Result<(), PersonalityError> {
        let mut personality = self
            .catalog
            .find_by_id(personality_id)?
            .ok_or_else(|| PersonalityError::PersonalityNotFound(personality_id.clone()))?;
        if self.catalog.find_tag(tag_id)?.is_none() {
            return Err(PersonalityError::TagNotFound(tag_id.clone()));
        }
        if personality.has_tag(tag_id) {
            return Err(PersonalityError::AlreadyTagged(tag_id.clone()));
        }

        personality.tags.push(tag_id.clone());
        self.catalog.update(personality)?;
        info!(personality = %personality_id, tag = %tag_id, "tag attached to personality");
        Ok(())
    }

    pub fn remove_tag(
        &self,
        personality_id: &PersonalityId,
        tag_id: &TagId,
    ) -> Result<(), PersonalityError> {
        let mut personality = self
            .catalog
            .find_by_id(personality_id)?
            .ok_or_else(|| PersonalityError::PersonalityNotFound(personality_id.clone()))?;
        if !personality.has_tag(tag_id) {
            return Err(PersonalityError::NotTagged(tag_id.clone()));
        }

        personality.tags.retain(|existing| existing != tag_id);
        self.catalog.update(personality)?;
        info!(personality = %personality_id, tag = %tag_id, "tag detached from personality");
        Ok(())
    }

    pub fn tags(&self) -> Result<Vec<Tag>, PersonalityError> {
        Ok(self.catalog.tags()?)
    }

    pub fn create_tag(&self, name: &str) -> Result<Tag, PersonalityError> {
        let name = normalize_tag_name(name)?;
        let tag = self.catalog.insert_tag(Tag {
            id: next_tag_id(),
            name,
        })?;
        info!(tag = %tag.id, name = %tag.name, "tag created");
        Ok(tag)
    }

    pub fn delete_tag(&self, tag_id: &TagId) -> Result<Tag, PersonalityError> {
        let tag = self
            .catalog
            .remove_tag(tag_id)?
            .ok_or_else(|| PersonalityError::TagNotFound(tag_id.clone()))?;
        info!(tag = %tag.id, "tag deleted and detached from personalities");
        Ok(tag)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PersonalityError {
    #[error("personality '{0}' does not exist")]
    PersonalityNotFound(PersonalityId),
    #[error("tag '{0}' does not exist")]
    TagNotFound(TagId),
    #[error("personality already has tag '{0}'")]
    AlreadyTagged(TagId),
    #[error("personality does not have tag '{0}'")]
    NotTagged(TagId),
    #[error(transparent)]
    InvalidTag(#[from] TagNameError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
