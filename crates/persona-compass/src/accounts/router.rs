use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::access::{Actor, Role, UserId};
use crate::error::json_error;
use crate::pagination::PageRequest;

use super::domain::{AccountFilter, UserAccount};
use super::repository::AccountDirectory;
use super::service::{AccountError, AccountService};

#[derive(Debug, Deserialize)]
pub(crate) struct RoleUpdate {
    pub(crate) role: Role,
}

/// Fields exposed in the admin user listing.
#[derive(Debug, Clone, Serialize)]
pub struct AccountView {
    pub id: UserId,
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
}

impl From<UserAccount> for AccountView {
    fn from(account: UserAccount) -> Self {
        Self {
            id: account.id,
            user_name: account.user_name,
            first_name: account.first_name,
            last_name: account.last_name,
            email: account.email,
            role: account.role,
        }
    }
}

pub fn account_router<D>(service: Arc<AccountService<D>>) -> Router
where
    D: AccountDirectory + 'static,
{
    Router::new()
        .route("/api/v1/users", get(list_handler::<D>))
        .route(
            "/api/v1/users/change-role/:user_id",
            patch(change_role_handler::<D>),
        )
        .with_state(service)
}

pub(crate) async fn list_handler<D>(
    State(service): State<Arc<AccountService<D>>>,
    actor: Actor,
    Query(page): Query<PageRequest>,
    Query(filter): Query<AccountFilter>,
) -> Response
where
    D: AccountDirectory + 'static,
{
    if let Err(denied) = actor.require_staff() {
        return denied.into_response();
    }

    match service.list(&filter, &page) {
        Ok(page) => {
            let page = page.map(AccountView::from);
            let payload = json!({ "users": page.items, "total": page.total });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn change_role_handler<D>(
    State(service): State<Arc<AccountService<D>>>,
    actor: Actor,
    Path(user_id): Path<String>,
    Json(body): Json<RoleUpdate>,
) -> Response
where
    D: AccountDirectory + 'static,
{
    if let Err(denied) = actor
        .require_verified()
        .and_then(|actor| actor.require_role(&[Role::SuperAdmin]))
    {
        return denied.into_response();
    }

    match service.change_role(&UserId(user_id), body.role) {
        Ok(account) => (
            StatusCode::OK,
            Json(json!({ "user": AccountView::from(account) })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: AccountError) -> Response {
    let status = match &err {
        AccountError::UserNotFound(_) => StatusCode::NOT_FOUND,
        AccountError::SuperAdminLocked | AccountError::AlreadyHasRole(_) => {
            StatusCode::BAD_REQUEST
        }
        AccountError::Repository(source) => source.status(),
    };
    json_error(status, err)
}
