use serde::{Deserialize, Serialize};

use crate::access::{Role, UserId};

/// Registered user as seen by administrators. Credentials are held upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub verified: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AccountFilter {
    #[serde(default)]
    pub user_name: Option<String>,
}

impl AccountFilter {
    /// Case-insensitive substring match on the user name.
    pub fn matches(&self, account: &UserAccount) -> bool {
        match self.user_name.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => account
                .user_name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            _ => true,
        }
    }
}

/// A single role assignment; several are applied together by the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleChange {
    pub user_id: UserId,
    pub role: Role,
}
