pub mod auth;
pub mod docs;
pub mod model;
pub mod page;
pub mod post;
pub mod theme;

pub use model::IdInput;
