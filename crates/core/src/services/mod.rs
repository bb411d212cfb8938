//! Business logic services.

pub mod exhibition;
pub mod post;
pub mod user;
pub mod visit_date;

pub use exhibition::{ExhibitionService, ExhibitionUpdate, TicketCover, TicketSummary};
pub use post::{CreatePostInput, CreatedPost, PostService, PostUpdate, TicketInput};
pub use user::UserService;
pub use visit_date::normalize_visit_date;
