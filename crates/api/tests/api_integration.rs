//! API integration tests.
//!
//! Endpoint-level tests against a mock database connection.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::Utc;
use imery_api::{AppState, router as api_router};
use imery_core::{ExhibitionService, PostService, UserService};
use imery_db::entities::{exhibition, post, post::Visibility, user};
use imery_db::repositories::{ExhibitionRepository, PostRepository, UserRepository};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use std::sync::Arc;
use tower::ServiceExt;

/// Build a router around a mock database connection.
fn test_router(db: DatabaseConnection) -> Router {
    let db = Arc::new(db);

    let state = AppState {
        user_service: UserService::new(UserRepository::new(Arc::clone(&db))),
        post_service: PostService::new(PostRepository::new(Arc::clone(&db))),
        exhibition_service: ExhibitionService::new(
            ExhibitionRepository::new(Arc::clone(&db)),
            PostRepository::new(db),
        ),
    };

    api_router().with_state(state)
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn test_post_model(id: &str, user_id: &str) -> post::Model {
    post::Model {
        id: id.to_string(),
        user_id: user_id.to_string(),
        title: "Water Lilies".to_string(),
        artist_name: Some("Claude Monet".to_string()),
        image_url: "/uploads/water-lilies.jpg".to_string(),
        description: None,
        rating: 4.5,
        work_date: "2025.01.01".to_string(),
        genre: None,
        style: None,
        tags: serde_json::json!([]),
        visibility: Visibility::Public,
        exhibition_id: None,
        created_at: Utc::now().into(),
    }
}

#[tokio::test]
async fn test_unknown_endpoint_returns_404() {
    let app = test_router(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

    let response = app
        .oneshot(post_json("/exhibitions/nope", "{}"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_show_unknown_exhibition_returns_404() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<exhibition::Model>::new()])
        .into_connection();

    let app = test_router(db);
    let response = app
        .oneshot(post_json(
            "/exhibitions/show",
            r#"{"exhibitionId":"missing"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_user_with_empty_username_returns_400() {
    let app = test_router(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

    let response = app
        .oneshot(post_json("/users/create", r#"{"username":"  "}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_user_conflict_returns_409() {
    let existing = user::Model {
        id: "user1".to_string(),
        username: "alice".to_string(),
        display_name: None,
        created_at: Utc::now().into(),
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[existing]])
        .into_connection();

    let app = test_router(db);
    let response = app
        .oneshot(post_json("/users/create", r#"{"username":"alice"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_ungrouped_post_returns_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[test_post_model("post1", "user1")]])
        .into_connection();

    let app = test_router(db);
    let response = app
        .oneshot(post_json(
            "/posts/create",
            r#"{
                "userId": "user1",
                "title": "Water Lilies",
                "imageUrl": "/uploads/water-lilies.jpg",
                "rating": 4.5,
                "workDate": "2025-01-01"
            }"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["data"]["post"]["id"], "post1");
    assert_eq!(body["data"]["post"]["workDate"], "2025.01.01");
    assert!(body["data"].get("exhibition").is_none());
}

#[tokio::test]
async fn test_create_post_with_bad_rating_returns_400() {
    let app = test_router(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

    let response = app
        .oneshot(post_json(
            "/posts/create",
            r#"{
                "userId": "user1",
                "title": "Water Lilies",
                "imageUrl": "/uploads/water-lilies.jpg",
                "rating": 6.0,
                "workDate": "2025-01-01"
            }"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_post_as_non_author_returns_403() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[test_post_model("post1", "user1")]])
        .into_connection();

    let app = test_router(db);
    let response = app
        .oneshot(post_json(
            "/posts/update",
            r#"{"postId":"post1","userId":"user2","rating":1.0}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_update_post_returns_updated_post() {
    let stored = test_post_model("post1", "user1");
    let mut updated = stored.clone();
    updated.rating = 3.0;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[stored]])
        .append_query_results([[updated]])
        .into_connection();

    let app = test_router(db);
    let response = app
        .oneshot(post_json(
            "/posts/update",
            r#"{"postId":"post1","userId":"user1","rating":3.0}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["data"]["id"], "post1");
    assert_eq!(body["data"]["rating"], 3.0);
}

#[tokio::test]
async fn test_update_exhibition_as_non_owner_returns_403() {
    let exhibition = exhibition::Model {
        id: "ex1".to_string(),
        user_id: "user1".to_string(),
        name: "National Gallery".to_string(),
        visit_date: "2025.01.01".to_string(),
        location: None,
        director: None,
        cast_members: None,
        visit_time: None,
        review: None,
        bg_color: "#123abc".to_string(),
        representative_post_id: None,
        created_at: Utc::now().into(),
        updated_at: None,
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[exhibition]])
        .into_connection();

    let app = test_router(db);
    let response = app
        .oneshot(post_json(
            "/exhibitions/update",
            r#"{"exhibitionId":"ex1","userId":"user2","review":"not mine"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
