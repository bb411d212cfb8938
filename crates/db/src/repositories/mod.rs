//! Database repositories.

pub mod exhibition;
pub mod post;
pub mod user;

pub use exhibition::{ExhibitionChanges, ExhibitionRepository, NewExhibitionRecord};
pub use post::{NewPostRecord, PostChanges, PostRepository};
pub use user::UserRepository;
