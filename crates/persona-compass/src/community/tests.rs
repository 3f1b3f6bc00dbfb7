use std::sync::Arc;

use axum::http::{Method, StatusCode};
use chrono::{TimeZone, Utc};
use serde_json::json;
use tower::ServiceExt;

use crate::access::{Role, UserId};
use crate::community::{
    comment_router, Comment, CommentError, CommentId, CommentService, CommentSort, ProfanityFilter,
};
use crate::pagination::PageRequest;
use crate::test_support::{accounts, read_json_body, request, MemoryAccounts, MemoryComments};

type MemoryCommentService = CommentService<MemoryComments, MemoryAccounts>;

fn seeded_comment(id: &str, author: &str, hour: u32) -> Comment {
    let at = Utc
        .with_ymd_and_hms(2025, 4, 2, hour, 30, 0)
        .single()
        .expect("valid timestamp");
    Comment {
        id: CommentId(id.to_string()),
        body: format!("comment {id}"),
        created_by: UserId(author.to_string()),
        created_at: at,
        updated_at: at,
    }
}

fn service_with(comments: Vec<Comment>) -> Arc<MemoryCommentService> {
    Arc::new(CommentService::new(
        Arc::new(MemoryComments::with(comments)),
        Arc::new(MemoryAccounts::with(accounts())),
        ProfanityFilter::with_extra_words(["spoiler"]),
    ))
}

fn user(raw: &str) -> UserId {
    UserId(raw.to_string())
}

#[test]
fn create_trims_and_resolves_author_name() {
    let service = service_with(Vec::new());

    let view = service
        .create(&user("u-1"), "  Really insightful results!  ")
        .expect("comment created");

    assert_eq!(view.comment, "Really insightful results!");
    assert_eq!(view.author.as_deref(), Some("layla"));
}

#[test]
fn create_rejects_profanity_and_configured_words() {
    let service = service_with(Vec::new());

    assert!(matches!(
        service.create(&user("u-1"), "this is shit"),
        Err(CommentError::Moderation(_))
    ));
    assert!(matches!(
        service.create(&user("u-1"), "Spoiler: you are an INTJ"),
        Err(CommentError::Moderation(_))
    ));
    assert!(matches!(
        service.create(&user("u-1"), "   "),
        Err(CommentError::InvalidBody(_))
    ));
}

#[test]
fn listings_sort_and_scope_by_author() {
    let service = service_with(vec![
        seeded_comment("c-1", "u-1", 8),
        seeded_comment("c-2", "u-2", 9),
        seeded_comment("c-3", "u-1", 10),
    ]);

    let newest = service
        .list_all(&PageRequest::default(), CommentSort::Newest)
        .expect("listing");
    let ids: Vec<_> = newest.items.iter().map(|view| view.id.0.as_str()).collect();
    assert_eq!(ids, vec!["c-3", "c-2", "c-1"]);

    let own = service
        .list_for_user(&user("u-1"), &PageRequest::new(1, 1), CommentSort::Oldest)
        .expect("listing");
    assert_eq!(own.total, 2);
    assert_eq!(own.items.len(), 1);
    assert_eq!(own.items[0].id, CommentId("c-1".to_string()));
}

#[test]
fn unknown_authors_are_listed_without_a_name() {
    let service = service_with(vec![seeded_comment("c-1", "u-deleted", 8)]);

    let page = service
        .list_all(&PageRequest::default(), CommentSort::Newest)
        .expect("listing");

    assert_eq!(page.items[0].author, None);
}

#[test]
fn only_the_author_may_edit_or_delete() {
    let service = service_with(vec![seeded_comment("c-1", "u-1", 8)]);
    let id = CommentId("c-1".to_string());

    assert!(matches!(
        service.update_own(&user("u-2"), &id, "Hijacked text"),
        Err(CommentError::NotAuthor(_))
    ));
    assert!(matches!(
        service.delete_own(&user("u-2"), &id),
        Err(CommentError::NotAuthor(_))
    ));

    let updated = service
        .update_own(&user("u-1"), &id, "Edited thoughts")
        .expect("author edits");
    assert_eq!(updated.comment, "Edited thoughts");

    service.delete_own(&user("u-1"), &id).expect("author deletes");
    assert!(matches!(
        service.delete_own(&user("u-1"), &id),
        Err(CommentError::NotFound(_))
    ));
}

#[test]
fn moderators_delete_any_comment() {
    let service = service_with(vec![seeded_comment("c-1", "u-1", 8)]);
    let id = CommentId("c-1".to_string());

    let removed = service.moderator_delete(&id).expect("removed");
    assert_eq!(removed.created_by, user("u-1"));
    assert!(matches!(
        service.moderator_delete(&id),
        Err(CommentError::NotFound(_))
    ));
}

#[tokio::test]
async fn public_listing_needs_no_identity() {
    let router = comment_router(service_with(vec![
        seeded_comment("c-1", "u-1", 8),
        seeded_comment("c-2", "u-2", 9),
    ]));

    let response = router
        .oneshot(request(
            Method::GET,
            "/api/v1/comments?sort=oldest&limit=1",
            None,
            None,
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["total"], json!(2));
    assert_eq!(payload["comments"][0]["id"], json!("c-1"));
    assert_eq!(payload["comments"][0]["author"], json!("layla"));
}

#[tokio::test]
async fn comment_routes_map_errors_to_statuses() {
    let router = comment_router(service_with(vec![seeded_comment("c-1", "u-1", 8)]));

    let flagged = router
        .clone()
        .oneshot(request(
            Method::POST,
            "/api/v1/user/comments",
            Some(("u-1", Role::User, true)),
            Some(json!({ "comment": "what a damn mess" })),
        ))
        .await
        .expect("router responds");
    assert_eq!(flagged.status(), StatusCode::BAD_REQUEST);

    let foreign = router
        .clone()
        .oneshot(request(
            Method::PATCH,
            "/api/v1/user/comments/c-1",
            Some(("u-2", Role::User, true)),
            Some(json!({ "comment": "not mine to edit" })),
        ))
        .await
        .expect("router responds");
    assert_eq!(foreign.status(), StatusCode::FORBIDDEN);

    let not_staff = router
        .clone()
        .oneshot(request(
            Method::DELETE,
            "/api/v1/comments/delete-comment/c-1",
            Some(("u-2", Role::User, true)),
            None,
        ))
        .await
        .expect("router responds");
    assert_eq!(not_staff.status(), StatusCode::FORBIDDEN);

    let moderated = router
        .oneshot(request(
            Method::DELETE,
            "/api/v1/comments/delete-comment/c-1",
            Some(("u-admin", Role::Admin, true)),
            None,
        ))
        .await
        .expect("router responds");
    assert_eq!(moderated.status(), StatusCode::OK);
}
