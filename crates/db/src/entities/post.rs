//! Post entity - one artwork/journal entry.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Post visibility levels.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[sea_orm(string_value = "public")]
    Public,
    #[sea_orm(string_value = "friends")]
    Friends,
    #[sea_orm(string_value = "private")]
    Private,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "post")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Author user ID.
    #[sea_orm(indexed)]
    pub user_id: String,

    /// Artwork title.
    pub title: String,

    /// Artist credited for the work.
    #[sea_orm(nullable)]
    pub artist_name: Option<String>,

    /// Stored image location.
    pub image_url: String,

    /// Journal text / review of the work.
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    /// Rating, 0.0 to 5.0.
    pub rating: f64,

    /// Normalized `YYYY.MM.DD` date the work was seen.
    pub work_date: String,

    /// Genre label.
    #[sea_orm(nullable)]
    pub genre: Option<String>,

    /// Style label.
    #[sea_orm(nullable)]
    pub style: Option<String>,

    /// Ordered list of tag label/path objects.
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: Json,

    /// Visibility level.
    pub visibility: Visibility,

    /// Exhibition this post belongs to. Set at creation iff the upload
    /// named an exhibition; never reassigned afterwards.
    #[sea_orm(nullable, indexed)]
    pub exhibition_id: Option<String>,

    /// When the post was created.
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::exhibition::Entity",
        from = "Column::ExhibitionId",
        to = "super::exhibition::Column::Id"
    )]
    Exhibition,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::exhibition::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exhibition.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
