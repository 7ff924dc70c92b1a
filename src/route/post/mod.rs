use aide::axum::{
	routing::{get_with, patch_with, post_with},
	ApiRouter,
};
use axum::http::StatusCode;

use crate::{error, store, AppState};

pub mod model;
pub mod route;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("unknown post {0}")]
	UnknownPost(i64),
	#[error("page {page} is out of range")]
	PageOutOfRange { page: usize, total_pages: usize },
	#[error(transparent)]
	Store(#[from] store::Error),
}

pub type RouteError = error::RouteError<Error>;

pub fn routes() -> ApiRouter<AppState> {
	use route::*;

	ApiRouter::new()
		.api_route(
			"/",
			get_with(get_posts, get_posts_docs).post_with(create_post, create_post_docs),
		)
		.api_route("/view", patch_with(update_view, update_view_docs))
		.api_route(
			"/:id",
			get_with(get_post, get_post_docs)
				.put_with(update_post, update_post_docs)
				.delete_with(delete_post, delete_post_docs),
		)
		.api_route("/:id/like", post_with(like_post, like_post_docs))
		.api_route("/:id/comments", post_with(add_comment, add_comment_docs))
}

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::UnknownPost(..) => StatusCode::NOT_FOUND,
			Self::PageOutOfRange { .. } | Self::Store(store::Error::EmptyComment) => {
				StatusCode::BAD_REQUEST
			}
			Self::Store(store::Error::Source(..)) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	fn into_errors(self) -> Vec<error::Message> {
		match self {
			Self::UnknownPost(post) => error::Message::new("unknown_post")
				.detail("post", post)
				.into_vec(),
			Self::PageOutOfRange { page, total_pages } => error::Message::new("page_out_of_range")
				.field("page")
				.detail("page", page)
				.detail("totalPages", total_pages)
				.into_vec(),
			Self::Store(store::Error::EmptyComment) => error::Message::new("empty_comment")
				.field("text")
				.into_vec(),
			Self::Store(store::Error::Source(..)) => Vec::new(),
		}
	}
}
