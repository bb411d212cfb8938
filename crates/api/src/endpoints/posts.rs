//! Post endpoints.

use axum::{Json, Router, extract::State, routing::post};
use imery_common::AppResult;
use imery_core::{CreatePostInput, PostUpdate, TicketInput};
use imery_db::entities::post::{self, Visibility};
use serde::{Deserialize, Serialize};

use crate::endpoints::exhibitions::ExhibitionResponse;
use crate::{response::ApiResponse, state::AppState};

/// Post response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub created_at: String,
    pub user_id: String,
    pub title: String,
    pub artist_name: Option<String>,
    pub image_url: String,
    pub description: Option<String>,
    pub rating: f64,
    pub work_date: String,
    pub genre: Option<String>,
    pub style: Option<String>,
    pub tags: serde_json::Value,
    pub visibility: Visibility,
    pub exhibition_id: Option<String>,
}

impl From<post::Model> for PostResponse {
    fn from(p: post::Model) -> Self {
        Self {
            id: p.id,
            created_at: p.created_at.to_rfc3339(),
            user_id: p.user_id,
            title: p.title,
            artist_name: p.artist_name,
            image_url: p.image_url,
            description: p.description,
            rating: p.rating,
            work_date: p.work_date,
            genre: p.genre,
            style: p.style,
            tags: p.tags,
            visibility: p.visibility,
            exhibition_id: p.exhibition_id,
        }
    }
}

/// Created post response: the post plus the ticket it landed on.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedPostResponse {
    pub post: PostResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exhibition: Option<ExhibitionResponse>,
}

/// Exhibition annotation on an upload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketRequest {
    pub name: String,
    pub visit_date: String,
    pub location: Option<String>,
}

/// Create post request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub user_id: String,
    pub title: String,
    pub artist_name: Option<String>,
    pub image_url: String,
    pub description: Option<String>,
    pub rating: f64,
    pub work_date: String,
    pub genre: Option<String>,
    pub style: Option<String>,
    #[serde(default = "default_tags")]
    pub tags: serde_json::Value,
    #[serde(default = "default_visibility")]
    pub visibility: Visibility,
    pub exhibition: Option<TicketRequest>,
}

/// Show post request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowPostRequest {
    pub post_id: String,
}

/// List user posts request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUserPostsRequest {
    pub user_id: String,
}

/// Update post request. Absent fields are left unchanged; the post's
/// exhibition cannot be reassigned.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    pub post_id: String,
    pub user_id: String,
    pub title: Option<String>,
    pub artist_name: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub rating: Option<f64>,
    pub work_date: Option<String>,
    pub genre: Option<String>,
    pub style: Option<String>,
    pub tags: Option<serde_json::Value>,
}

/// Delete post request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePostRequest {
    pub post_id: String,
    pub user_id: String,
}

fn default_tags() -> serde_json::Value {
    serde_json::Value::Array(Vec::new())
}

const fn default_visibility() -> Visibility {
    Visibility::Public
}

/// Create a post, grouping it into a ticket when annotated.
async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreatePostRequest>,
) -> AppResult<ApiResponse<CreatedPostResponse>> {
    let input = CreatePostInput {
        title: req.title,
        artist_name: req.artist_name,
        image_url: req.image_url,
        description: req.description,
        rating: req.rating,
        work_date: req.work_date,
        genre: req.genre,
        style: req.style,
        tags: req.tags,
        visibility: req.visibility,
        exhibition: req.exhibition.map(|t| TicketInput {
            name: t.name,
            visit_date: t.visit_date,
            location: t.location,
        }),
    };

    let created = state.post_service.create(&req.user_id, input).await?;

    Ok(ApiResponse::ok(CreatedPostResponse {
        post: created.post.into(),
        exhibition: created.exhibition.map(Into::into),
    }))
}

/// Show a post.
async fn show(
    State(state): State<AppState>,
    Json(req): Json<ShowPostRequest>,
) -> AppResult<ApiResponse<PostResponse>> {
    let post = state.post_service.get_by_id(&req.post_id).await?;

    Ok(ApiResponse::ok(post.into()))
}

/// List a user's posts, newest first.
async fn user(
    State(state): State<AppState>,
    Json(req): Json<ListUserPostsRequest>,
) -> AppResult<ApiResponse<Vec<PostResponse>>> {
    let posts = state.post_service.list_by_user(&req.user_id).await?;

    Ok(ApiResponse::ok(posts.into_iter().map(Into::into).collect()))
}

/// Update a post's editable fields.
async fn update(
    State(state): State<AppState>,
    Json(req): Json<UpdatePostRequest>,
) -> AppResult<ApiResponse<PostResponse>> {
    let changes = PostUpdate {
        title: req.title,
        artist_name: req.artist_name,
        image_url: req.image_url,
        description: req.description,
        rating: req.rating,
        work_date: req.work_date,
        genre: req.genre,
        style: req.style,
        tags: req.tags,
    };

    let post = state
        .post_service
        .update(&req.post_id, &req.user_id, changes)
        .await?;

    Ok(ApiResponse::ok(post.into()))
}

/// Delete a post.
async fn delete(
    State(state): State<AppState>,
    Json(req): Json<DeletePostRequest>,
) -> AppResult<ApiResponse<()>> {
    state
        .post_service
        .delete(&req.post_id, &req.user_id)
        .await?;

    Ok(ApiResponse::ok(()))
}

/// Create the posts router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create))
        .route("/show", post(show))
        .route("/user", post(user))
        .route("/update", post(update))
        .route("/delete", post(delete))
}
