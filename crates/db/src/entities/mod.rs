//! Database entities.

pub mod exhibition;
pub mod post;
pub mod user;

pub use exhibition::Entity as Exhibition;
pub use post::Entity as Post;
pub use user::Entity as User;
