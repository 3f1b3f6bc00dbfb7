use crate::repository::RepositoryError;

use super::domain::{PersonalityDescription, PersonalityId, Tag, TagId};

/// Personality descriptions and the tags attached to them.
///
/// Tags live in the same catalog so deleting one can detach it from every personality
/// inside a single operation.
pub trait PersonalityCatalog: Send + Sync {
    fn find_by_code(&self, code: &str) -> Result<Option<PersonalityDescription>, RepositoryError>;
    fn find_by_id(
        &self,
        id: &PersonalityId,
    ) -> Result<Option<PersonalityDescription>, RepositoryError>;
    /// Every description, ordered by code.
    fn list(&self) -> Result<Vec<PersonalityDescription>, RepositoryError>;
    /// Fails with `Conflict` when the id or code is already present.
    fn insert(
        &self,
        personality: PersonalityDescription,
    ) -> Result<PersonalityDescription, RepositoryError>;
    fn update(&self, personality: PersonalityDescription) -> Result<(), RepositoryError>;

    fn tags(&self) -> Result<Vec<Tag>, RepositoryError>;
    fn find_tag(&self, id: &TagId) -> Result<Option<Tag>, RepositoryError>;
    /// Fails with `Conflict` when the name is already used.
    fn insert_tag(&self, tag: Tag) -> Result<Tag, RepositoryError>;
    /// Remove the tag and detach it from every personality.
    fn remove_tag(&self, id: &TagId) -> Result<Option<Tag>, RepositoryError>;
}
