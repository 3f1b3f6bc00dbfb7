use std::sync::Arc;

use tracing::info;

use crate::access::{Role, UserId};
use crate::pagination::{Page, PageRequest};
use crate::repository::RepositoryError;

use super::domain::{AccountFilter, RoleChange, UserAccount};
use super::repository::AccountDirectory;

/// Administrative view over the account directory.
pub struct AccountService<D> {
    directory: Arc<D>,
}

impl<D> AccountService<D>
where
    D: AccountDirectory + 'static,
{
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }

    pub fn list(
        &self,
        filter: &AccountFilter,
        page: &PageRequest,
    ) -> Result<Page<UserAccount>, AccountError> {
        let matching = self
            .directory
            .list()?
            .into_iter()
            .filter(|account| filter.matches(account))
            .collect();
        Ok(page.slice(matching))
    }

    /// Change a user's role. There is exactly one super admin: promoting someone to
    /// super admin hands the role over and demotes the previous holder to admin.
    pub fn change_role(&self, user_id: &UserId, role: Role) -> Result<UserAccount, AccountError> {
        let mut account = self
            .directory
            .find(user_id)?
            .ok_or_else(|| AccountError::UserNotFound(user_id.clone()))?;

        if account.role == Role::SuperAdmin {
            return Err(AccountError::SuperAdminLocked);
        }
        if account.role == role {
            return Err(AccountError::AlreadyHasRole(role));
        }

        let mut changes = Vec::new();
        if role == Role::SuperAdmin {
            changes.extend(
                self.directory
                    .find_by_role(Role::SuperAdmin)?
                    .into_iter()
                    .map(|holder| RoleChange {
                        user_id: holder.id,
                        role: Role::Admin,
                    }),
            );
        }
        changes.push(RoleChange {
            user_id: user_id.clone(),
            role,
        });

        self.directory.apply_role_changes(&changes)?;
        info!(user = %user_id, from = %account.role, to = %role, "account role changed");

        account.role = role;
        Ok(account)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("user '{0}' does not exist")]
    UserNotFound(UserId),
    #[error("the super admin role cannot be changed directly")]
    SuperAdminLocked,
    #[error("user already has role '{0}'")]
    AlreadyHasRole(Role),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
