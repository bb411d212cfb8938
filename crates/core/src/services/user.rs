//! User service.

use imery_common::{AppError, AppResult, IdGenerator};
use imery_db::entities::user;
use imery_db::repositories::UserRepository;
use tracing::info;

/// Service for managing users.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub const fn new(user_repo: UserRepository) -> Self {
        Self {
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Register a new user.
    pub async fn register(
        &self,
        username: &str,
        display_name: Option<String>,
    ) -> AppResult<user::Model> {
        let username = username.trim();
        if username.is_empty() || username.len() > 64 {
            return Err(AppError::Validation(
                "Username must be between 1 and 64 characters".to_string(),
            ));
        }

        if self.user_repo.find_by_username(username).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Username '{username}' is already taken"
            )));
        }

        let user = self
            .user_repo
            .create(self.id_gen.generate(), username.to_string(), display_name)
            .await?;

        info!(user_id = %user.id, "Registered user");
        Ok(user)
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, user_id: &str) -> AppResult<user::Model> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::UserNotFound(user_id.to_string()))
    }

    /// Delete a user. Their posts and exhibitions cascade.
    pub async fn delete(&self, user_id: &str) -> AppResult<()> {
        self.user_repo.delete(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn test_user(id: &str, username: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            username: username.to_string(),
            display_name: None,
            created_at: Utc::now().into(),
        }
    }

    fn service(db: sea_orm::DatabaseConnection) -> UserService {
        UserService::new(UserRepository::new(Arc::new(db)))
    }

    #[tokio::test]
    async fn test_register() {
        let created = test_user("user1", "alice");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .append_query_results([[created]])
            .into_connection();

        let svc = service(db);
        let user = svc.register("alice", None).await.unwrap();

        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let existing = test_user("user1", "alice");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[existing]])
            .into_connection();

        let svc = service(db);
        let result = svc.register("alice", None).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_register_rejects_empty_username() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let svc = service(db);
        let result = svc.register("  ", None).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();

        let svc = service(db);
        let result = svc.get_by_id("missing").await;

        assert!(matches!(result, Err(AppError::UserNotFound(_))));
    }
}
