//! User repository.

use std::sync::Arc;

use chrono::Utc;
use imery_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

use crate::entities::{User, user};

/// Repository for user operations.
#[derive(Clone)]
pub struct UserRepository {
    db: Arc<DatabaseConnection>,
}

impl UserRepository {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find user by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<user::Model>> {
        User::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find user by username.
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<user::Model>> {
        User::find()
            .filter(user::Column::Username.eq(username))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new user.
    pub async fn create(
        &self,
        id: String,
        username: String,
        display_name: Option<String>,
    ) -> AppResult<user::Model> {
        let active_model = user::ActiveModel {
            id: Set(id),
            username: Set(username),
            display_name: Set(display_name),
            created_at: Set(Utc::now().into()),
        };

        active_model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a user (posts and exhibitions cascade).
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let deleted = User::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if deleted.rows_affected == 0 {
            return Err(AppError::UserNotFound(id.to_string()));
        }

        Ok(())
    }
}
