//! Exhibition repository.

use std::sync::Arc;

use chrono::Utc;
use imery_common::{AppError, AppResult};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    Order, QueryFilter, QueryOrder, Set,
};

use crate::entities::{Exhibition, exhibition};

/// Grouping-key lookup, generic over the connection so it runs on a
/// plain connection or inside a transaction.
pub(crate) async fn find_ticket_by_key<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
    name: &str,
    visit_date: &str,
) -> Result<Option<exhibition::Model>, DbErr> {
    Exhibition::find()
        .filter(exhibition::Column::UserId.eq(user_id))
        .filter(exhibition::Column::Name.eq(name))
        .filter(exhibition::Column::VisitDate.eq(visit_date))
        .one(conn)
        .await
}

pub(crate) async fn insert_ticket<C: ConnectionTrait>(
    conn: &C,
    record: NewExhibitionRecord,
) -> Result<exhibition::Model, DbErr> {
    record.into_active_model().insert(conn).await
}

/// First-post-wins cover assignment; matches no rows once a cover is
/// set, so later posts never steal it.
pub(crate) async fn assign_cover_if_unset<C: ConnectionTrait>(
    conn: &C,
    exhibition_id: &str,
    post_id: &str,
) -> Result<bool, DbErr> {
    let result = Exhibition::update_many()
        .col_expr(
            exhibition::Column::RepresentativePostId,
            Expr::value(post_id),
        )
        .filter(exhibition::Column::Id.eq(exhibition_id))
        .filter(exhibition::Column::RepresentativePostId.is_null())
        .exec(conn)
        .await?;

    Ok(result.rows_affected > 0)
}

/// Fields for inserting a new exhibition ticket.
///
/// `visit_date` must already be normalized to the canonical form; the
/// repository stores grouping-key fields verbatim.
#[derive(Debug, Clone)]
pub struct NewExhibitionRecord {
    /// Pre-generated ticket ID.
    pub id: String,
    /// Owner.
    pub user_id: String,
    /// Grouping-key name.
    pub name: String,
    /// Grouping-key date, canonical form.
    pub visit_date: String,
    /// Venue, if known at upload time.
    pub location: Option<String>,
    /// Pre-generated background color.
    pub bg_color: String,
}

impl NewExhibitionRecord {
    pub(crate) fn into_active_model(self) -> exhibition::ActiveModel {
        exhibition::ActiveModel {
            id: Set(self.id),
            user_id: Set(self.user_id),
            name: Set(self.name),
            visit_date: Set(self.visit_date),
            location: Set(self.location),
            director: Set(None),
            cast_members: Set(None),
            visit_time: Set(None),
            review: Set(None),
            bg_color: Set(self.bg_color),
            representative_post_id: Set(None),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
        }
    }
}

/// Partial update for ticket metadata.
///
/// Each field is an explicit presence marker: `None` leaves the stored
/// value untouched, `Some` replaces it. Membership fields (`user_id`,
/// `name`, `visit_date`) are not editable here.
#[derive(Debug, Clone, Default)]
pub struct ExhibitionChanges {
    /// Owner's review text.
    pub review: Option<String>,
    /// Ticket background color.
    pub bg_color: Option<String>,
    /// Cover post reassignment.
    pub representative_post_id: Option<String>,
    /// Director credit.
    pub director: Option<String>,
    /// Cast credit.
    pub cast_members: Option<String>,
    /// Visit time label.
    pub visit_time: Option<String>,
}

/// Repository for exhibition ticket operations.
#[derive(Clone)]
pub struct ExhibitionRepository {
    db: Arc<DatabaseConnection>,
}

impl ExhibitionRepository {
    /// Create a new exhibition repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find exhibition by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<exhibition::Model>> {
        Exhibition::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find the exhibition matching a grouping key exactly.
    ///
    /// `visit_date` must already be normalized; lookup is exact-string
    /// on all three components.
    pub async fn find_by_key(
        &self,
        user_id: &str,
        name: &str,
        visit_date: &str,
    ) -> AppResult<Option<exhibition::Model>> {
        find_ticket_by_key(self.db.as_ref(), user_id, name, visit_date)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find all exhibitions for a user, most recent visit first.
    pub async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<exhibition::Model>> {
        Exhibition::find()
            .filter(exhibition::Column::UserId.eq(user_id))
            .order_by(exhibition::Column::VisitDate, Order::Desc)
            .order_by(exhibition::Column::CreatedAt, Order::Desc)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new exhibition ticket.
    pub async fn create(&self, record: NewExhibitionRecord) -> AppResult<exhibition::Model> {
        insert_ticket(self.db.as_ref(), record)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Apply a partial metadata update.
    ///
    /// Absent fields keep their current stored value.
    pub async fn update(
        &self,
        id: &str,
        changes: ExhibitionChanges,
    ) -> AppResult<exhibition::Model> {
        let exhibition = Exhibition::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .ok_or_else(|| AppError::ExhibitionNotFound(id.to_string()))?;

        let mut active: exhibition::ActiveModel = exhibition.into();

        if let Some(review) = changes.review {
            active.review = Set(Some(review));
        }
        if let Some(bg_color) = changes.bg_color {
            active.bg_color = Set(bg_color);
        }
        if let Some(post_id) = changes.representative_post_id {
            active.representative_post_id = Set(Some(post_id));
        }
        if let Some(director) = changes.director {
            active.director = Set(Some(director));
        }
        if let Some(cast_members) = changes.cast_members {
            active.cast_members = Set(Some(cast_members));
        }
        if let Some(visit_time) = changes.visit_time {
            active.visit_time = Set(Some(visit_time));
        }

        active.updated_at = Set(Some(Utc::now().into()));

        active
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Fill the representative post if and only if it is still unset.
    ///
    /// Returns `true` when this call assigned the cover. Once a cover is
    /// set the statement matches no rows and later posts never steal it.
    pub async fn assign_representative_if_unset(
        &self,
        exhibition_id: &str,
        post_id: &str,
    ) -> AppResult<bool> {
        assign_cover_if_unset(self.db.as_ref(), exhibition_id, post_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
