use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::access::Actor;
use crate::error::json_error;
use crate::personalities::PersonalityCatalog;

use super::domain::{Answer, QuestionDraft, QuestionId};
use super::repository::{QuestionCatalog, ResultStore};
use super::service::{AssessmentError, AssessmentService};

#[derive(Debug, Serialize, Deserialize)]
pub struct CalculateRequest {
    pub answers: Vec<Answer>,
}

/// Router builder exposing the questionnaire, scoring, and result endpoints.
pub fn assessment_router<Q, P, R>(service: Arc<AssessmentService<Q, P, R>>) -> Router
where
    Q: QuestionCatalog + 'static,
    P: PersonalityCatalog + 'static,
    R: ResultStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/questions",
            get(list_questions_handler::<Q, P, R>).post(add_question_handler::<Q, P, R>),
        )
        .route(
            "/api/v1/questions/calculate",
            post(calculate_handler::<Q, P, R>),
        )
        .route(
            "/api/v1/questions/user-result",
            get(user_result_handler::<Q, P, R>),
        )
        .route(
            "/api/v1/questions/:question_id",
            patch(update_question_handler::<Q, P, R>).delete(delete_question_handler::<Q, P, R>),
        )
        .with_state(service)
}

pub(crate) async fn list_questions_handler<Q, P, R>(
    State(service): State<Arc<AssessmentService<Q, P, R>>>,
) -> Response
where
    Q: QuestionCatalog + 'static,
    P: PersonalityCatalog + 'static,
    R: ResultStore + 'static,
{
    match service.questions() {
        Ok(questions) => (StatusCode::OK, Json(json!({ "questions": questions }))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn add_question_handler<Q, P, R>(
    State(service): State<Arc<AssessmentService<Q, P, R>>>,
    actor: Actor,
    Json(draft): Json<QuestionDraft>,
) -> Response
where
    Q: QuestionCatalog + 'static,
    P: PersonalityCatalog + 'static,
    R: ResultStore + 'static,
{
    if let Err(denied) = actor.require_staff() {
        return denied.into_response();
    }

    match service.add_question(draft) {
        Ok(question) => {
            (StatusCode::CREATED, Json(json!({ "question": question }))).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_question_handler<Q, P, R>(
    State(service): State<Arc<AssessmentService<Q, P, R>>>,
    actor: Actor,
    Path(question_id): Path<String>,
    Json(draft): Json<QuestionDraft>,
) -> Response
where
    Q: QuestionCatalog + 'static,
    P: PersonalityCatalog + 'static,
    R: ResultStore + 'static,
{
    if let Err(denied) = actor.require_staff() {
        return denied.into_response();
    }

    match service.update_question(&QuestionId(question_id), draft) {
        Ok(question) => (StatusCode::OK, Json(json!({ "question": question }))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_question_handler<Q, P, R>(
    State(service): State<Arc<AssessmentService<Q, P, R>>>,
    actor: Actor,
    Path(question_id): Path<String>,
) -> Response
where
    Q: QuestionCatalog + 'static,
    P: PersonalityCatalog + 'static,
    R: ResultStore + 'static,
{
    if let Err(denied) = actor.require_staff() {
        return denied.into_response();
    }

    match service.delete_question(&QuestionId(question_id)) {
        Ok(question) => (
            StatusCode::OK,
            Json(json!({ "status": "question deleted", "question_id": question.id })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn calculate_handler<Q, P, R>(
    State(service): State<Arc<AssessmentService<Q, P, R>>>,
    actor: Actor,
    Json(request): Json<CalculateRequest>,
) -> Response
where
    Q: QuestionCatalog + 'static,
    P: PersonalityCatalog + 'static,
    R: ResultStore + 'static,
{
    if let Err(denied) = actor.require_verified() {
        return denied.into_response();
    }

    match service.score_answers(&actor.user_id, &request.answers) {
        Ok(description) => (StatusCode::OK, Json(json!({ "result": description }))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn user_result_handler<Q, P, R>(
    State(service): State<Arc<AssessmentService<Q, P, R>>>,
    actor: Actor,
) -> Response
where
    Q: QuestionCatalog + 'static,
    P: PersonalityCatalog + 'static,
    R: ResultStore + 'static,
{
    if let Err(denied) = actor.require_verified() {
        return denied.into_response();
    }

    match service.user_result(&actor.user_id) {
        Ok(description) => (StatusCode::OK, Json(json!({ "result": description }))).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: AssessmentError) -> Response {
    let status = match &err {
        AssessmentError::Scoring(_) | AssessmentError::InvalidQuestion(_) => {
            StatusCode::BAD_REQUEST
        }
        AssessmentError::PersonalityMissing { .. }
        | AssessmentError::NoResult(_)
        | AssessmentError::QuestionNotFound(_) => StatusCode::NOT_FOUND,
        AssessmentError::Repository(source) => source.status(),
    };
    json_error(status, err)
}
