//! API endpoints.

mod exhibitions;
mod posts;
mod users;

use axum::Router;

use crate::state::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/posts", posts::router())
        .nest("/exhibitions", exhibitions::router())
}
