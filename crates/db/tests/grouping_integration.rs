//! Grouping integration tests.
//!
//! These tests require a running `PostgreSQL` instance.
//! Run with: `cargo test --test grouping_integration -- --ignored`
//!
//! Environment variables:
//!   `TEST_DB_HOST` (default: localhost)
//!   `TEST_DB_PORT` (default: 5433)
//!   `TEST_DB_USER` (default: `imery_test`)
//!   `TEST_DB_PASSWORD` (default: `imery_test`)
//!   `TEST_DB_NAME` (default: `imery_test`)

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use imery_common::IdGenerator;
use imery_db::entities::post::Visibility;
use imery_db::repositories::{
    ExhibitionChanges, ExhibitionRepository, NewExhibitionRecord, NewPostRecord, PostRepository,
    UserRepository,
};
use imery_db::test_utils::TestDatabase;

fn post_record(id_gen: &IdGenerator, user_id: &str, title: &str, rating: f64) -> NewPostRecord {
    NewPostRecord {
        id: id_gen.generate(),
        user_id: user_id.to_string(),
        title: title.to_string(),
        artist_name: Some("Claude Monet".to_string()),
        image_url: format!("/uploads/{title}.jpg"),
        description: None,
        rating,
        work_date: "2025.01.01".to_string(),
        genre: Some("impressionism".to_string()),
        style: None,
        tags: serde_json::json!([]),
        visibility: Visibility::Public,
    }
}

fn ticket_record(
    id_gen: &IdGenerator,
    user_id: &str,
    name: &str,
    visit_date: &str,
) -> NewExhibitionRecord {
    NewExhibitionRecord {
        id: id_gen.generate(),
        user_id: user_id.to_string(),
        name: name.to_string(),
        visit_date: visit_date.to_string(),
        location: Some("Trafalgar Square".to_string()),
        bg_color: "#336699".to_string(),
    }
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_same_key_reuses_ticket_and_first_post_wins() {
    let db = TestDatabase::new().await.unwrap();
    db.cleanup().await.unwrap();

    let conn = Arc::clone(&db.conn);
    let users = UserRepository::new(Arc::clone(&conn));
    let posts = PostRepository::new(Arc::clone(&conn));
    let exhibitions = ExhibitionRepository::new(Arc::clone(&conn));
    let id_gen = IdGenerator::new();

    let user = users
        .create(id_gen.generate(), "u1".to_string(), None)
        .await
        .unwrap();

    // Upload A names a fresh exhibition: a ticket is created and A
    // becomes its representative.
    let (post_a, ticket_a) = posts
        .create_in_ticket(
            post_record(&id_gen, &user.id, "a", 4.0),
            ticket_record(&id_gen, &user.id, "National Gallery", "2025.01.01"),
        )
        .await
        .unwrap();

    let e1 = exhibitions.find_by_id(&ticket_a.id).await.unwrap().unwrap();
    assert_eq!(e1.representative_post_id.as_deref(), Some(post_a.id.as_str()));

    // Upload B with the same (name, date) joins the same ticket and
    // does not steal the cover.
    let (post_b, ticket_b) = posts
        .create_in_ticket(
            post_record(&id_gen, &user.id, "b", 5.0),
            ticket_record(&id_gen, &user.id, "National Gallery", "2025.01.01"),
        )
        .await
        .unwrap();

    assert_eq!(ticket_b.id, ticket_a.id);
    assert_eq!(post_b.exhibition_id.as_deref(), Some(ticket_a.id.as_str()));

    let e1 = exhibitions.find_by_id(&ticket_a.id).await.unwrap().unwrap();
    assert_eq!(e1.representative_post_id.as_deref(), Some(post_a.id.as_str()));
    assert_eq!(posts.count_by_exhibition(&ticket_a.id).await.unwrap(), 2);
    assert_eq!(
        posts.average_rating(&ticket_a.id).await.unwrap(),
        Some(4.5)
    );

    // Upload C with the same name but a different date gets a new
    // ticket.
    let (_post_c, ticket_c) = posts
        .create_in_ticket(
            post_record(&id_gen, &user.id, "c", 3.0),
            ticket_record(&id_gen, &user.id, "National Gallery", "2025.01.02"),
        )
        .await
        .unwrap();

    assert_ne!(ticket_c.id, ticket_a.id);
    assert_eq!(posts.count_by_exhibition(&ticket_c.id).await.unwrap(), 1);

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_partial_update_preserves_untouched_fields() {
    let db = TestDatabase::new().await.unwrap();
    db.cleanup().await.unwrap();

    let conn = Arc::clone(&db.conn);
    let users = UserRepository::new(Arc::clone(&conn));
    let exhibitions = ExhibitionRepository::new(Arc::clone(&conn));
    let id_gen = IdGenerator::new();

    let user = users
        .create(id_gen.generate(), "u2".to_string(), None)
        .await
        .unwrap();

    let created = exhibitions
        .create(ticket_record(&id_gen, &user.id, "Tate Modern", "2025.03.10"))
        .await
        .unwrap();

    let updated = exhibitions
        .update(
            &created.id,
            ExhibitionChanges {
                review: Some("unforgettable".to_string()),
                ..ExhibitionChanges::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.review.as_deref(), Some("unforgettable"));
    assert_eq!(updated.bg_color, created.bg_color);
    assert_eq!(updated.director, created.director);
    assert_eq!(updated.cast_members, created.cast_members);
    assert_eq!(updated.visit_time, created.visit_time);
    assert!(updated.updated_at.is_some());

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_user_deletion_cascades() {
    let db = TestDatabase::new().await.unwrap();
    db.cleanup().await.unwrap();

    let conn = Arc::clone(&db.conn);
    let users = UserRepository::new(Arc::clone(&conn));
    let posts = PostRepository::new(Arc::clone(&conn));
    let exhibitions = ExhibitionRepository::new(Arc::clone(&conn));
    let id_gen = IdGenerator::new();

    let user = users
        .create(id_gen.generate(), "u3".to_string(), None)
        .await
        .unwrap();

    let (post, ticket) = posts
        .create_in_ticket(
            post_record(&id_gen, &user.id, "a", 4.0),
            ticket_record(&id_gen, &user.id, "Louvre", "2025.02.02"),
        )
        .await
        .unwrap();

    users.delete(&user.id).await.unwrap();

    assert!(posts.find_by_id(&post.id).await.unwrap().is_none());
    assert!(exhibitions.find_by_id(&ticket.id).await.unwrap().is_none());

    db.cleanup().await.unwrap();
}
