use aide::axum::IntoApiResponse;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use macros::route;

use crate::{
	extract::{Json, Path, Session},
	model::normalize_tags,
	openapi::tag,
	route::IdInput,
	store::PostStore,
};

use super::{model, Error, RouteError};

/// Get posts
/// Loads the posts if needed and returns the current page of the filtered listing.
#[route(tag = tag::POST)]
pub async fn get_posts(State(posts): State<PostStore>) -> Json<model::View> {
	posts.fetch_posts().await;

	Json(posts.view())
}

/// Update listing
/// Changes the search query, category filter or page, and returns the new page. A new search or category always starts from the first page.
#[route(tag = tag::POST)]
pub async fn update_view(
	State(posts): State<PostStore>,
	Json(input): Json<model::ViewInput>,
) -> Result<Json<model::View>, RouteError> {
	if let Some(search) = input.search {
		posts.set_search_query(search);
	}

	if let Some(category) = input.category {
		posts.set_selected_category(category);
	}

	if let Some(page) = input.page {
		let total_pages = posts.total_pages();

		if page > total_pages.max(1) {
			return Err(Error::PageOutOfRange { page, total_pages }.into());
		}

		posts.set_current_page(page);
	}

	Ok(Json(posts.view()))
}

/// Get single post
/// Returns a single post by its unique id.
#[route(tag = tag::POST)]
pub async fn get_post(
	State(posts): State<PostStore>,
	Path(IdInput { id }): Path<IdInput>,
) -> Result<Json<model::Post>, RouteError> {
	let post = posts.get_post(id).ok_or(Error::UnknownPost(id))?;

	Ok(Json(post))
}

/// Create post
/// Creates a new post at the top of the listing.
#[route(tag = tag::POST)]
pub async fn create_post(
	State(posts): State<PostStore>,
	_session: Session,
	Json(input): Json<model::CreatePostInput>,
) -> Result<Json<model::Post>, RouteError> {
	let post = posts
		.add_post(
			input.title,
			input.body,
			input.category,
			normalize_tags(input.tags),
		)
		.await;

	Ok(Json(post))
}

/// Update post
/// Replaces the title, body, category and tags of an existing post.
#[route(tag = tag::POST)]
pub async fn update_post(
	State(posts): State<PostStore>,
	_session: Session,
	Path(IdInput { id }): Path<IdInput>,
	Json(input): Json<model::UpdatePostInput>,
) -> Result<Json<model::Post>, RouteError> {
	let post = posts
		.update_post(
			id,
			input.title,
			input.body,
			input.category,
			normalize_tags(input.tags),
		)
		.await
		.ok_or(Error::UnknownPost(id))?;

	Ok(Json(post))
}

/// Delete post
/// Deletes an existing post by its unique id.
#[route(tag = tag::POST, response(status = 204, description = "Deleted successfully."))]
pub async fn delete_post(
	State(posts): State<PostStore>,
	_session: Session,
	Path(IdInput { id }): Path<IdInput>,
) -> Result<impl IntoApiResponse, RouteError> {
	if !posts.delete_post(id).await {
		return Err(Error::UnknownPost(id).into());
	}

	Ok(StatusCode::NO_CONTENT.into_response())
}

/// Like post
/// Adds one like to a post and returns it.
#[route(tag = tag::POST)]
pub async fn like_post(
	State(posts): State<PostStore>,
	_session: Session,
	Path(IdInput { id }): Path<IdInput>,
) -> Result<Json<model::Post>, RouteError> {
	let post = posts.like_post(id).ok_or(Error::UnknownPost(id))?;

	Ok(Json(post))
}

/// Add comment
/// Adds a comment by the signed-in user to a post. Blank comments are rejected.
#[route(tag = tag::POST)]
pub async fn add_comment(
	State(posts): State<PostStore>,
	session: Session,
	Path(IdInput { id }): Path<IdInput>,
	Json(input): Json<model::CommentInput>,
) -> Result<Json<model::Comment>, RouteError> {
	let comment = posts
		.add_comment(id, &input.text, &session.user.name)
		.map_err(Error::Store)?
		.ok_or(Error::UnknownPost(id))?;

	Ok(Json(comment))
}
