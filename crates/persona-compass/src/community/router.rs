use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::access::Actor;
use crate::accounts::AccountDirectory;
use crate::error::json_error;
use crate::pagination::{Page, PageRequest};

use super::domain::{CommentId, CommentSort, CommentView};
use super::repository::CommentStore;
use super::service::{CommentError, CommentService};

#[derive(Debug, Deserialize)]
pub(crate) struct CommentBody {
    pub(crate) comment: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SortQuery {
    #[serde(default)]
    pub(crate) sort: CommentSort,
}

pub fn comment_router<C, D>(service: Arc<CommentService<C, D>>) -> Router
where
    C: CommentStore + 'static,
    D: AccountDirectory + 'static,
{
    Router::new()
        .route("/api/v1/comments", get(list_all_handler::<C, D>))
        .route(
            "/api/v1/comments/delete-comment/:comment_id",
            delete(moderator_delete_handler::<C, D>),
        )
        .route(
            "/api/v1/user/comments",
            get(list_own_handler::<C, D>).post(create_handler::<C, D>),
        )
        .route(
            "/api/v1/user/comments/:comment_id",
            patch(update_handler::<C, D>).delete(delete_own_handler::<C, D>),
        )
        .with_state(service)
}

fn listing_response(page: Page<CommentView>) -> Response {
    let payload = json!({ "comments": page.items, "total": page.total });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn list_all_handler<C, D>(
    State(service): State<Arc<CommentService<C, D>>>,
    Query(page): Query<PageRequest>,
    Query(sort): Query<SortQuery>,
) -> Response
where
    C: CommentStore + 'static,
    D: AccountDirectory + 'static,
{
    match service.list_all(&page, sort.sort) {
        Ok(page) => listing_response(page),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_own_handler<C, D>(
    State(service): State<Arc<CommentService<C, D>>>,
    actor: Actor,
    Query(page): Query<PageRequest>,
    Query(sort): Query<SortQuery>,
) -> Response
where
    C: CommentStore + 'static,
    D: AccountDirectory + 'static,
{
    match service.list_for_user(&actor.user_id, &page, sort.sort) {
        Ok(page) => listing_response(page),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_handler<C, D>(
    State(service): State<Arc<CommentService<C, D>>>,
    actor: Actor,
    Json(body): Json<CommentBody>,
) -> Response
where
    C: CommentStore + 'static,
    D: AccountDirectory + 'static,
{
    if let Err(denied) = actor.require_verified() {
        return denied.into_response();
    }

    match service.create(&actor.user_id, &body.comment) {
        Ok(view) => (StatusCode::CREATED, Json(json!({ "comment": view }))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_handler<C, D>(
    State(service): State<Arc<CommentService<C, D>>>,
    actor: Actor,
    Path(comment_id): Path<String>,
    Json(body): Json<CommentBody>,
) -> Response
where
    C: CommentStore + 'static,
    D: AccountDirectory + 'static,
{
    if let Err(denied) = actor.require_verified() {
        return denied.into_response();
    }

    match service.update_own(&actor.user_id, &CommentId(comment_id), &body.comment) {
        Ok(view) => (StatusCode::OK, Json(json!({ "comment": view }))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_own_handler<C, D>(
    State(service): State<Arc<CommentService<C, D>>>,
    actor: Actor,
    Path(comment_id): Path<String>,
) -> Response
where
    C: CommentStore + 'static,
    D: AccountDirectory + 'static,
{
    if let Err(denied) = actor.require_verified() {
        return denied.into_response();
    }

    match service.delete_own(&actor.user_id, &CommentId(comment_id)) {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "comment deleted" }))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn moderator_delete_handler<C, D>(
    State(service): State<Arc<CommentService<C, D>>>,
    actor: Actor,
    Path(comment_id): Path<String>,
) -> Response
where
    C: CommentStore + 'static,
    D: AccountDirectory + 'static,
{
    if let Err(denied) = actor.require_staff() {
        return denied.into_response();
    }

    match service.moderator_delete(&CommentId(comment_id)) {
        Ok(_) => (StatusCode::OK, Json(json!({ "status": "comment deleted" }))).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: CommentError) -> Response {
    let status = match &err {
        CommentError::NotFound(_) => StatusCode::NOT_FOUND,
        CommentError::NotAuthor(_) => StatusCode::FORBIDDEN,
        CommentError::InvalidBody(_) | CommentError::Moderation(_) => StatusCode::BAD_REQUEST,
        CommentError::Repository(source) => source.status(),
    };
    json_error(status, err)
}
