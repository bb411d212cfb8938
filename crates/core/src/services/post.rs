//! Post service.

use imery_common::{AppError, AppResult, IdGenerator, TicketColor};
use imery_db::entities::{exhibition, post, post::Visibility};
use imery_db::repositories::{NewExhibitionRecord, NewPostRecord, PostChanges, PostRepository};
use tracing::debug;

use crate::services::visit_date::normalize_visit_date;

/// Exhibition annotation attached to an upload.
///
/// Presence of this struct (with a non-empty name) is what triggers
/// ticket grouping; uploads without it stay ungrouped.
#[derive(Debug, Clone)]
pub struct TicketInput {
    /// Exhibition name (grouping key).
    pub name: String,
    /// Visit date, any supported separator.
    pub visit_date: String,
    /// Venue, optional.
    pub location: Option<String>,
}

/// Fields for creating a post.
#[derive(Debug, Clone)]
pub struct CreatePostInput {
    /// Artwork title.
    pub title: String,
    /// Credited artist.
    pub artist_name: Option<String>,
    /// Stored image location.
    pub image_url: String,
    /// Journal text.
    pub description: Option<String>,
    /// Rating, 0.0 to 5.0.
    pub rating: f64,
    /// Date the work was seen, any supported separator.
    pub work_date: String,
    /// Genre label.
    pub genre: Option<String>,
    /// Style label.
    pub style: Option<String>,
    /// Ordered tag objects.
    pub tags: serde_json::Value,
    /// Visibility level.
    pub visibility: Visibility,
    /// Exhibition annotation; `None` means no grouping.
    pub exhibition: Option<TicketInput>,
}

/// Partial update for a post.
///
/// Presence markers, like [`crate::ExhibitionUpdate`]: `None` leaves a
/// field unchanged. Ticket membership is not editable; a post keeps its
/// exhibition for life.
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    /// Artwork title.
    pub title: Option<String>,
    /// Credited artist.
    pub artist_name: Option<String>,
    /// Stored image location.
    pub image_url: Option<String>,
    /// Journal text.
    pub description: Option<String>,
    /// Rating, 0.0 to 5.0.
    pub rating: Option<f64>,
    /// Date the work was seen, any supported separator.
    pub work_date: Option<String>,
    /// Genre label.
    pub genre: Option<String>,
    /// Style label.
    pub style: Option<String>,
    /// Ordered tag objects.
    pub tags: Option<serde_json::Value>,
}

/// Result of a post creation, with the ticket it landed on (if any).
#[derive(Debug, Clone)]
pub struct CreatedPost {
    /// The inserted post.
    pub post: post::Model,
    /// The ticket the post was grouped into, when annotated.
    pub exhibition: Option<exhibition::Model>,
}

/// Service for managing posts.
#[derive(Clone)]
pub struct PostService {
    post_repo: PostRepository,
    id_gen: IdGenerator,
    colors: TicketColor,
}

impl PostService {
    /// Create a new post service.
    #[must_use]
    pub const fn new(post_repo: PostRepository) -> Self {
        Self {
            post_repo,
            id_gen: IdGenerator::new(),
            colors: TicketColor::new(),
        }
    }

    /// Create a post, grouping it into an exhibition ticket when the
    /// input carries an exhibition annotation.
    ///
    /// The annotated path runs resolve-or-create on the ticket, the post
    /// insert, and the first-post-wins cover assignment inside one
    /// database transaction.
    pub async fn create(&self, user_id: &str, input: CreatePostInput) -> AppResult<CreatedPost> {
        if input.title.trim().is_empty() {
            return Err(AppError::Validation(
                "Post title must not be empty".to_string(),
            ));
        }
        if input.image_url.trim().is_empty() {
            return Err(AppError::Validation(
                "Post image URL must not be empty".to_string(),
            ));
        }
        if !(0.0..=5.0).contains(&input.rating) {
            return Err(AppError::Validation(
                "Rating must be between 0 and 5".to_string(),
            ));
        }

        let record = NewPostRecord {
            id: self.id_gen.generate(),
            user_id: user_id.to_string(),
            title: input.title,
            artist_name: input.artist_name,
            image_url: input.image_url,
            description: input.description,
            rating: input.rating,
            work_date: normalize_visit_date(&input.work_date),
            genre: input.genre,
            style: input.style,
            tags: input.tags,
            visibility: input.visibility,
        };

        match input.exhibition {
            Some(ticket) => {
                let name = ticket.name.trim().to_string();
                if name.is_empty() {
                    return Err(AppError::Validation(
                        "Exhibition name must not be empty".to_string(),
                    ));
                }

                let ticket_record = NewExhibitionRecord {
                    id: self.id_gen.generate(),
                    user_id: user_id.to_string(),
                    name,
                    visit_date: normalize_visit_date(&ticket.visit_date),
                    location: ticket.location,
                    bg_color: self.colors.random(),
                };

                let (post, exhibition) =
                    self.post_repo.create_in_ticket(record, ticket_record).await?;
                debug!(post_id = %post.id, exhibition_id = %exhibition.id, "Created grouped post");

                Ok(CreatedPost {
                    post,
                    exhibition: Some(exhibition),
                })
            }
            None => {
                let post = self.post_repo.create(record).await?;
                debug!(post_id = %post.id, "Created ungrouped post");

                Ok(CreatedPost {
                    post,
                    exhibition: None,
                })
            }
        }
    }

    /// Get a post by ID.
    pub async fn get_by_id(&self, post_id: &str) -> AppResult<post::Model> {
        self.post_repo
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| AppError::PostNotFound(post_id.to_string()))
    }

    /// List a user's posts, newest first.
    pub async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<post::Model>> {
        self.post_repo.find_by_user(user_id).await
    }

    /// Apply a partial update to a post. Only the author may edit.
    ///
    /// Absent fields keep their stored value; ticket membership cannot
    /// be changed through this or any other path.
    pub async fn update(
        &self,
        post_id: &str,
        user_id: &str,
        update: PostUpdate,
    ) -> AppResult<post::Model> {
        let post = self
            .post_repo
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| AppError::PostNotFound(post_id.to_string()))?;

        if post.user_id != user_id {
            return Err(AppError::Forbidden("Not the post author".to_string()));
        }

        if let Some(ref title) = update.title
            && title.trim().is_empty()
        {
            return Err(AppError::Validation(
                "Post title must not be empty".to_string(),
            ));
        }
        if let Some(ref image_url) = update.image_url
            && image_url.trim().is_empty()
        {
            return Err(AppError::Validation(
                "Post image URL must not be empty".to_string(),
            ));
        }
        if let Some(rating) = update.rating
            && !(0.0..=5.0).contains(&rating)
        {
            return Err(AppError::Validation(
                "Rating must be between 0 and 5".to_string(),
            ));
        }

        let changes = PostChanges {
            title: update.title,
            artist_name: update.artist_name,
            image_url: update.image_url,
            description: update.description,
            rating: update.rating,
            work_date: update.work_date.map(|d| normalize_visit_date(&d)),
            genre: update.genre,
            style: update.style,
            tags: update.tags,
        };

        self.post_repo.update(post_id, changes).await
    }

    /// Delete a post. Only the author may delete.
    pub async fn delete(&self, post_id: &str, user_id: &str) -> AppResult<()> {
        let post = self
            .post_repo
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| AppError::PostNotFound(post_id.to_string()))?;

        if post.user_id != user_id {
            return Err(AppError::Forbidden("Not the post author".to_string()));
        }

        self.post_repo.delete(post_id).await
    }
}
