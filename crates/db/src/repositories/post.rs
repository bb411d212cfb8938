//! Post repository.

use std::sync::Arc;

use chrono::Utc;
use imery_common::{AppError, AppResult};
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult,
    Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::entities::{
    Post, exhibition,
    post::{self, Visibility},
};
use crate::repositories::exhibition::{
    NewExhibitionRecord, assign_cover_if_unset, find_ticket_by_key, insert_ticket,
};

/// Fields for inserting a new post.
///
/// `work_date` must already be normalized to the canonical form.
#[derive(Debug, Clone)]
pub struct NewPostRecord {
    /// Pre-generated post ID.
    pub id: String,
    /// Author.
    pub user_id: String,
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
    /// Canonical date the work was seen.
    pub work_date: String,
    /// Genre label.
    pub genre: Option<String>,
    /// Style label.
    pub style: Option<String>,
    /// Ordered tag objects.
    pub tags: serde_json::Value,
    /// Visibility level.
    pub visibility: Visibility,
}

impl NewPostRecord {
    fn into_active_model(self) -> post::ActiveModel {
        post::ActiveModel {
            id: Set(self.id),
            user_id: Set(self.user_id),
            title: Set(self.title),
            artist_name: Set(self.artist_name),
            image_url: Set(self.image_url),
            description: Set(self.description),
            rating: Set(self.rating),
            work_date: Set(self.work_date),
            genre: Set(self.genre),
            style: Set(self.style),
            tags: Set(self.tags),
            visibility: Set(self.visibility),
            exhibition_id: Set(None),
            created_at: Set(Utc::now().into()),
        }
    }
}

/// Partial update for a post's editable fields.
///
/// Each field is an explicit presence marker: `None` leaves the stored
/// value untouched, `Some` replaces it. `exhibition_id` is deliberately
/// absent; ticket membership is fixed at creation and never reassigned.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
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
    /// Canonical date the work was seen.
    pub work_date: Option<String>,
    /// Genre label.
    pub genre: Option<String>,
    /// Style label.
    pub style: Option<String>,
    /// Ordered tag objects.
    pub tags: Option<serde_json::Value>,
}

#[derive(FromQueryResult)]
struct AvgRatingRow {
    avg_rating: Option<f64>,
}

/// Repository for post operations.
#[derive(Clone)]
pub struct PostRepository {
    db: Arc<DatabaseConnection>,
}

impl PostRepository {
    /// Create a new post repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find post by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<post::Model>> {
        Post::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find posts by author, newest first.
    pub async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<post::Model>> {
        Post::find()
            .filter(post::Column::UserId.eq(user_id))
            .order_by(post::Column::Id, Order::Desc)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find posts attached to an exhibition, newest first.
    pub async fn find_by_exhibition(&self, exhibition_id: &str) -> AppResult<Vec<post::Model>> {
        Post::find()
            .filter(post::Column::ExhibitionId.eq(exhibition_id))
            .order_by(post::Column::Id, Order::Desc)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count posts attached to an exhibition.
    pub async fn count_by_exhibition(&self, exhibition_id: &str) -> AppResult<u64> {
        Post::find()
            .filter(post::Column::ExhibitionId.eq(exhibition_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Mean rating over an exhibition's posts, `None` when it has none.
    pub async fn average_rating(&self, exhibition_id: &str) -> AppResult<Option<f64>> {
        let avg: SimpleExpr = Func::avg(Expr::col(post::Column::Rating)).into();

        let row = Post::find()
            .select_only()
            .column_as(avg, "avg_rating")
            .filter(post::Column::ExhibitionId.eq(exhibition_id))
            .into_model::<AvgRatingRow>()
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(row.and_then(|r| r.avg_rating))
    }

    /// Apply a partial update to a post's editable fields.
    ///
    /// Absent fields keep their current stored value. `exhibition_id`
    /// is never written here; membership is set at creation only.
    pub async fn update(&self, id: &str, changes: PostChanges) -> AppResult<post::Model> {
        let post = Post::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .ok_or_else(|| AppError::PostNotFound(id.to_string()))?;

        let mut active: post::ActiveModel = post.into();

        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(artist_name) = changes.artist_name {
            active.artist_name = Set(Some(artist_name));
        }
        if let Some(image_url) = changes.image_url {
            active.image_url = Set(image_url);
        }
        if let Some(description) = changes.description {
            active.description = Set(Some(description));
        }
        if let Some(rating) = changes.rating {
            active.rating = Set(rating);
        }
        if let Some(work_date) = changes.work_date {
            active.work_date = Set(work_date);
        }
        if let Some(genre) = changes.genre {
            active.genre = Set(Some(genre));
        }
        if let Some(style) = changes.style {
            active.style = Set(Some(style));
        }
        if let Some(tags) = changes.tags {
            active.tags = Set(tags);
        }

        active
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a post.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Post::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    /// Create an ungrouped post (`exhibition_id` stays NULL).
    pub async fn create(&self, record: NewPostRecord) -> AppResult<post::Model> {
        record
            .into_active_model()
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a post inside its exhibition ticket, atomically.
    ///
    /// Runs resolve-or-create on the ticket grouping key, inserts the
    /// post with `exhibition_id` set, and fills the representative post
    /// if the ticket has none yet - all inside one transaction, so a
    /// crash cannot leave a ticket without its triggering post.
    ///
    /// `ticket` carries pre-generated id and color; both are ignored
    /// when an existing ticket matches the key.
    pub async fn create_in_ticket(
        &self,
        record: NewPostRecord,
        ticket: NewExhibitionRecord,
    ) -> AppResult<(post::Model, exhibition::Model)> {
        self.db
            .transaction::<_, (post::Model, exhibition::Model), DbErr>(move |txn| {
                Box::pin(async move {
                    let existing =
                        find_ticket_by_key(txn, &ticket.user_id, &ticket.name, &ticket.visit_date)
                            .await?;

                    let ticket_row = match existing {
                        Some(row) => row,
                        None => insert_ticket(txn, ticket).await?,
                    };

                    let mut active = record.into_active_model();
                    active.exhibition_id = Set(Some(ticket_row.id.clone()));
                    let inserted = active.insert(txn).await?;

                    assign_cover_if_unset(txn, &ticket_row.id, &inserted.id).await?;

                    Ok((inserted, ticket_row))
                })
            })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
