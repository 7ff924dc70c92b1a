//! In-memory state containers owned by the application [`State`](crate::State).

pub mod post;
pub mod seed;
pub mod session;
pub mod theme;

pub use post::{Latency, Page, PostStore, View};
pub use seed::{PostSource, SeedPosts};
pub use session::SessionStore;
pub use theme::ThemeStore;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("failed to load posts: {0}")]
	Source(String),
	#[error("comment text must not be blank")]
	EmptyComment,
}
