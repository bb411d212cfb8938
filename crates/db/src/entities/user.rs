//! User entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User entity - owner of posts and exhibition tickets.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Unique login name.
    #[sea_orm(unique)]
    pub username: String,

    /// Display name shown in the UI.
    #[sea_orm(nullable)]
    pub display_name: Option<String>,

    /// When the account was created.
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Posts,
    #[sea_orm(has_many = "super::exhibition::Entity")]
    Exhibitions,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Posts.def()
    }
}

impl Related<super::exhibition::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exhibitions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
