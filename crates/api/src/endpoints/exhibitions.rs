//! Exhibition ticket endpoints.

use axum::{Json, Router, extract::State, routing::post};
use imery_common::AppResult;
use imery_core::{ExhibitionUpdate, TicketCover, TicketSummary};
use imery_db::entities::exhibition;
use serde::{Deserialize, Serialize};

use crate::endpoints::posts::PostResponse;
use crate::{response::ApiResponse, state::AppState};

/// Exhibition ticket response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExhibitionResponse {
    pub id: String,
    pub created_at: String,
    pub updated_at: Option<String>,
    pub user_id: String,
    pub name: String,
    pub visit_date: String,
    pub location: Option<String>,
    pub director: Option<String>,
    pub cast_members: Option<String>,
    pub visit_time: Option<String>,
    pub review: Option<String>,
    pub bg_color: String,
    pub representative_post_id: Option<String>,
}

impl From<exhibition::Model> for ExhibitionResponse {
    fn from(e: exhibition::Model) -> Self {
        Self {
            id: e.id,
            created_at: e.created_at.to_rfc3339(),
            updated_at: e.updated_at.map(|t| t.to_rfc3339()),
            user_id: e.user_id,
            name: e.name,
            visit_date: e.visit_date,
            location: e.location,
            director: e.director,
            cast_members: e.cast_members,
            visit_time: e.visit_time,
            review: e.review,
            bg_color: e.bg_color,
            representative_post_id: e.representative_post_id,
        }
    }
}

/// Representative post fields on a ticket summary.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketCoverResponse {
    pub post_id: String,
    pub image_url: String,
    pub title: String,
    pub artist_name: Option<String>,
}

impl From<TicketCover> for TicketCoverResponse {
    fn from(c: TicketCover) -> Self {
        Self {
            post_id: c.post_id,
            image_url: c.image_url,
            title: c.title,
            artist_name: c.artist_name,
        }
    }
}

/// Decorated ticket for the gallery listing.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketSummaryResponse {
    pub exhibition: ExhibitionResponse,
    pub post_count: u64,
    pub avg_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<TicketCoverResponse>,
}

impl From<TicketSummary> for TicketSummaryResponse {
    fn from(s: TicketSummary) -> Self {
        Self {
            exhibition: s.exhibition.into(),
            post_count: s.post_count,
            avg_rating: s.avg_rating,
            cover: s.cover.map(Into::into),
        }
    }
}

/// Ticket detail: the ticket plus its member posts.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExhibitionDetailResponse {
    pub exhibition: ExhibitionResponse,
    pub posts: Vec<PostResponse>,
}

/// List exhibitions request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListExhibitionsRequest {
    pub user_id: String,
}

/// Show exhibition request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowExhibitionRequest {
    pub exhibition_id: String,
}

/// Update exhibition request. Absent fields are left unchanged.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExhibitionRequest {
    pub exhibition_id: String,
    pub user_id: String,
    pub review: Option<String>,
    pub bg_color: Option<String>,
    pub representative_post_id: Option<String>,
    pub director: Option<String>,
    pub cast_members: Option<String>,
    pub visit_time: Option<String>,
}

/// List a user's tickets, decorated for the gallery view.
async fn list(
    State(state): State<AppState>,
    Json(req): Json<ListExhibitionsRequest>,
) -> AppResult<ApiResponse<Vec<TicketSummaryResponse>>> {
    let summaries = state.exhibition_service.list_for_user(&req.user_id).await?;

    Ok(ApiResponse::ok(
        summaries.into_iter().map(Into::into).collect(),
    ))
}

/// Show a ticket with its member posts.
async fn show(
    State(state): State<AppState>,
    Json(req): Json<ShowExhibitionRequest>,
) -> AppResult<ApiResponse<ExhibitionDetailResponse>> {
    let (exhibition, posts) = state
        .exhibition_service
        .get_with_posts(&req.exhibition_id)
        .await?;

    Ok(ApiResponse::ok(ExhibitionDetailResponse {
        exhibition: exhibition.into(),
        posts: posts.into_iter().map(Into::into).collect(),
    }))
}

/// Partially update a ticket's metadata.
async fn update(
    State(state): State<AppState>,
    Json(req): Json<UpdateExhibitionRequest>,
) -> AppResult<ApiResponse<ExhibitionResponse>> {
    let exhibition = state
        .exhibition_service
        .update(
            &req.exhibition_id,
            &req.user_id,
            ExhibitionUpdate {
                review: req.review,
                bg_color: req.bg_color,
                representative_post_id: req.representative_post_id,
                director: req.director,
                cast_members: req.cast_members,
                visit_time: req.visit_time,
            },
        )
        .await?;

    Ok(ApiResponse::ok(exhibition.into()))
}

/// Create the exhibitions router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", post(list))
        .route("/show", post(show))
        .route("/update", post(update))
}
