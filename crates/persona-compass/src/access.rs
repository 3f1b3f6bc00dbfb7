//! Caller identity as forwarded by the fronting gateway.
//!
//! Sessions are terminated upstream; every request reaching the service carries the
//! authenticated user in `x-user-id`, the account role in `x-user-role`, and whether the
//! email address has been confirmed in `x-user-verified`.

use std::fmt;
use std::str::FromStr;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";
pub const USER_VERIFIED_HEADER: &str = "x-user-verified";

/// Identifier wrapper for registered users.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Account privilege level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Admin,
    SuperAdmin,
}

impl Role {
    pub const STAFF: [Role; 2] = [Role::Admin, Role::SuperAdmin];

    pub const fn label(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Role {
    type Err = AccessError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            "super_admin" | "super-admin" => Ok(Role::SuperAdmin),
            other => Err(AccessError::UnknownRole(other.to_string())),
        }
    }
}

/// Authenticated caller resolved from request headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: UserId,
    pub role: Role,
    pub verified: bool,
}

impl Actor {
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, AccessError> {
        let user_id = header_value(headers, USER_ID_HEADER)
            .filter(|value| !value.is_empty())
            .ok_or(AccessError::Unauthenticated)?;

        let role = match header_value(headers, USER_ROLE_HEADER) {
            Some(raw) if !raw.is_empty() => raw.parse()?,
            _ => Role::User,
        };

        let verified = header_value(headers, USER_VERIFIED_HEADER)
            .map(|raw| matches!(raw.to_ascii_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            user_id: UserId(user_id),
            role,
            verified,
        })
    }

    pub fn require_verified(&self) -> Result<&Self, AccessError> {
        if self.verified {
            Ok(self)
        } else {
            Err(AccessError::Unverified)
        }
    }

    pub fn require_role(&self, allowed: &[Role]) -> Result<&Self, AccessError> {
        if allowed.contains(&self.role) {
            Ok(self)
        } else {
            Err(AccessError::Forbidden { role: self.role })
        }
    }

    /// Verified staff member (admin or super admin).
    pub fn require_staff(&self) -> Result<&Self, AccessError> {
        self.require_verified()?.require_role(&Role::STAFF)
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().to_string())
}

#[async_trait]
impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = AccessError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Actor::from_headers(&parts.headers)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    #[error("authentication required")]
    Unauthenticated,
    #[error("unknown role '{0}'")]
    UnknownRole(String),
    #[error("email address must be verified first")]
    Unverified,
    #[error("role '{role}' is not allowed to perform this action")]
    Forbidden { role: Role },
}

impl AccessError {
    pub fn status(&self) -> StatusCode {
        match self {
            AccessError::Unauthenticated | AccessError::UnknownRole(_) => StatusCode::UNAUTHORIZED,
            AccessError::Unverified | AccessError::Forbidden { .. } => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for AccessError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
