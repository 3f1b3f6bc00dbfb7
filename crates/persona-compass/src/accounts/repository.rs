use crate::access::{Role, UserId};
use crate::repository::RepositoryError;

use super::domain::{RoleChange, UserAccount};

pub trait AccountDirectory: Send + Sync {
    fn insert(&self, account: UserAccount) -> Result<UserAccount, RepositoryError>;
    fn find(&self, id: &UserId) -> Result<Option<UserAccount>, RepositoryError>;
    /// Every account, ordered by user name.
    fn list(&self) -> Result<Vec<UserAccount>, RepositoryError>;
    fn find_by_role(&self, role: Role) -> Result<Vec<UserAccount>, RepositoryError>;
    /// Apply all changes or none; any unknown user id fails with `NotFound`.
    fn apply_role_changes(&self, changes: &[RoleChange]) -> Result<(), RepositoryError>;
}
