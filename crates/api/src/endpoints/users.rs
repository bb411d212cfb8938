//! User endpoints.

use axum::{Json, Router, extract::State, routing::post};
use imery_common::AppResult;
use imery_db::entities::user;
use serde::{Deserialize, Serialize};

use crate::{response::ApiResponse, state::AppState};

/// User response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub created_at: String,
    pub username: String,
    pub display_name: Option<String>,
}

impl From<user::Model> for UserResponse {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            created_at: u.created_at.to_rfc3339(),
            username: u.username,
            display_name: u.display_name,
        }
    }
}

/// Create user request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
    pub display_name: Option<String>,
}

/// Show user request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowUserRequest {
    pub user_id: String,
}

/// Delete user request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUserRequest {
    pub user_id: String,
}

/// Register a new user.
async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state
        .user_service
        .register(&req.username, req.display_name)
        .await?;

    Ok(ApiResponse::ok(user.into()))
}

/// Show a user.
async fn show(
    State(state): State<AppState>,
    Json(req): Json<ShowUserRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.user_service.get_by_id(&req.user_id).await?;

    Ok(ApiResponse::ok(user.into()))
}

/// Delete a user and everything they own.
async fn delete(
    State(state): State<AppState>,
    Json(req): Json<DeleteUserRequest>,
) -> AppResult<ApiResponse<()>> {
    state.user_service.delete(&req.user_id).await?;

    Ok(ApiResponse::ok(()))
}

/// Create the users router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create))
        .route("/show", post(show))
        .route("/delete", post(delete))
}
