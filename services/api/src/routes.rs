use crate::infra::{AppState, Stores};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use persona_compass::accounts::{account_router, AccountService};
use persona_compass::assessment::{assessment_router, AssessmentService};
use persona_compass::community::{comment_router, CommentService, ProfanityFilter};
use persona_compass::personalities::{personality_router, PersonalityService};
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// Every feature router plus the operational endpoints, sharing one set of stores.
pub(crate) fn with_api_routes(stores: &Stores, filter: ProfanityFilter) -> Router {
    let assessment = Arc::new(AssessmentService::new(
        stores.questions.clone(),
        stores.personalities.clone(),
        stores.results.clone(),
    ));
    let personalities = Arc::new(PersonalityService::new(stores.personalities.clone()));
    let comments = Arc::new(CommentService::new(
        stores.comments.clone(),
        stores.accounts.clone(),
        filter,
    ));
    let accounts = Arc::new(AccountService::new(stores.accounts.clone()));

    assessment_router(assessment)
        .merge(personality_router(personalities))
        .merge(comment_router(comments))
        .merge(account_router(accounts))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
