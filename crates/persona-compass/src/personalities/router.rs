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
use crate::error::json_error;
use crate::pagination::PageRequest;

use super::domain::{Language, PersonalityFilter, PersonalityId, TagId};
use super::repository::PersonalityCatalog;
use super::service::{PersonalityError, PersonalityService};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LanguageQuery {
    #[serde(default)]
    pub(crate) language: Language,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TagAssignment {
    pub(crate) tag_id: TagId,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NewTag {
    pub(crate) tag: String,
}

/// Staff endpoints for browsing personalities and curating their tags.
pub fn personality_router<P>(service: Arc<PersonalityService<P>>) -> Router
where
    P: PersonalityCatalog + 'static,
{
    Router::new()
        .route("/api/v1/personalities", get(list_handler::<P>))
        .route(
            "/api/v1/personalities/add-tag/:personality_id",
            patch(add_tag_handler::<P>),
        )
        .route(
            "/api/v1/personalities/remove-tag/:personality_id",
            patch(remove_tag_handler::<P>),
        )
        .route(
            "/api/v1/tags",
            get(tags_handler::<P>).post(create_tag_handler::<P>),
        )
        .route("/api/v1/tags/:tag_id", delete(delete_tag_handler::<P>))
        .with_state(service)
}

pub(crate) async fn list_handler<P>(
    State(service): State<Arc<PersonalityService<P>>>,
    actor: Actor,
    Query(page): Query<PageRequest>,
    Query(filter): Query<PersonalityFilter>,
    Query(language): Query<LanguageQuery>,
) -> Response
where
    P: PersonalityCatalog + 'static,
{
    if let Err(denied) = actor.require_staff() {
        return denied.into_response();
    }

    match service.list(&filter, &page, language.language) {
        Ok(page) => {
            let payload = json!({
                "personalities": page.items,
                "total": page.total,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn add_tag_handler<P>(
    State(service): State<Arc<PersonalityService<P>>>,
    actor: Actor,
    Path(personality_id): Path<String>,
    Json(body): Json<TagAssignment>,
) -> Response
where
    P: PersonalityCatalog + 'static,
{
    if let Err(denied) = actor.require_staff() {
        return denied.into_response();
    }

    match service.add_tag(&PersonalityId(personality_id), &body.tag_id) {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "tag added to personality" })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn remove_tag_handler<P>(
    State(service): State<Arc<PersonalityService<P>>>,
    actor: Actor,
    Path(personality_id): Path<String>,
    Json(body): Json<TagAssignment>,
) -> Response
where
    P: PersonalityCatalog + 'static,
{
    if let Err(denied) = actor.require_staff() {
        return denied.into_response();
    }

    match service.remove_tag(&PersonalityId(personality_id), &body.tag_id) {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "tag removed from personality" })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn tags_handler<P>(
    State(service): State<Arc<PersonalityService<P>>>,
    actor: Actor,
) -> Response
where
    P: PersonalityCatalog + 'static,
{
    if let Err(denied) = actor.require_staff() {
        return denied.into_response();
    }

    match service.tags() {
        Ok(tags) => (StatusCode::OK, Json(json!({ "tags": tags }))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_tag_handler<P>(
    State(service): State<Arc<PersonalityService<P>>>,
    actor: Actor,
    Json(body): Json<NewTag>,
) -> Response
where
    P: PersonalityCatalog + 'static,
{
    if let Err(denied) = actor.require_staff() {
        return denied.into_response();
    }

    match service.create_tag(&body.tag) {
        Ok(tag) => (StatusCode::CREATED, Json(json!({ "tag": tag }))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_tag_handler<P>(
    State(service): State<Arc<PersonalityService<P>>>,
    actor: Actor,
    Path(tag_id): Path<String>,
) -> Response
where
    P: PersonalityCatalog + 'static,
{
    if let Err(denied) = actor.require_staff() {
        return denied.into_response();
    }

    match service.delete_tag(&TagId(tag_id)) {
        Ok(tag) => (
            StatusCode::OK,
            Json(json!({ "status": "tag deleted", "tag_id": tag.id })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: PersonalityError) -> Response {
    let status = match &err {
        PersonalityError::PersonalityNotFound(_)
        | PersonalityError::TagNotFound(_)
        | PersonalityError::NotTagged(_) => StatusCode::NOT_FOUND,
        PersonalityError::AlreadyTagged(_) | PersonalityError::InvalidTag(_) => {
            StatusCode::BAD_REQUEST
        }
        PersonalityError::Repository(source) => source.status(),
    };
    json_error(status, err)
}
