//! Exhibition entity - a "ticket" grouping the artworks from one visit.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Exhibition entity.
///
/// One row per `(user_id, name, visit_date)` visit. Posts uploaded with
/// the same grouping key attach to the same ticket.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "exhibition")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Owner; immutable after creation.
    #[sea_orm(indexed)]
    pub user_id: String,

    /// Exhibition name as entered by the user; part of the grouping key.
    pub name: String,

    /// Canonical `YYYY.MM.DD` visit date; part of the grouping key.
    pub visit_date: String,

    /// Venue address or description.
    #[sea_orm(nullable)]
    pub location: Option<String>,

    /// Director credit shown on the ticket back.
    #[sea_orm(nullable)]
    pub director: Option<String>,

    /// Cast credit shown on the ticket back.
    #[sea_orm(nullable)]
    pub cast_members: Option<String>,

    /// Visit time label (free text).
    #[sea_orm(nullable)]
    pub visit_time: Option<String>,

    /// Owner's review of the visit.
    #[sea_orm(column_type = "Text", nullable)]
    pub review: Option<String>,

    /// Ticket background color (hex, never white).
    pub bg_color: String,

    /// Weak reference to the post supplying the cover thumbnail.
    /// Set once to the first attached post, reassignable by the owner.
    #[sea_orm(nullable)]
    pub representative_post_id: Option<String>,

    /// When the ticket was created.
    pub created_at: DateTimeWithTimeZone,

    /// When the ticket metadata was last edited.
    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::post::Entity")]
    Posts,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Posts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
