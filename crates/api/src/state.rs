//! Shared application state.

use imery_core::{ExhibitionService, PostService, UserService};

/// Application state shared across all endpoints.
#[derive(Clone)]
pub struct AppState {
    /// User account service.
    pub user_service: UserService,
    /// Post service.
    pub post_service: PostService,
    /// Exhibition ticket service.
    pub exhibition_service: ExhibitionService,
}
