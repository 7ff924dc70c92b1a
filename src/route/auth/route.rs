use aide::axum::IntoApiResponse;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use macros::route;

use crate::{
	extract::{Json, Session},
	model::{SessionRecord, User},
	openapi::tag,
	store::SessionStore,
};

use super::{model, RouteError};

/// Log in
/// Signs in with any email address, returning the new session.
#[route(tag = tag::AUTH)]
pub async fn login(
	State(session): State<SessionStore>,
	Json(auth): Json<model::LoginInput>,
) -> Result<Json<SessionRecord>, RouteError> {
	Ok(Json(session.login(&auth.email).await?))
}

/// Register account
/// Creates an account and signs in with it, returning the new session.
#[route(tag = tag::AUTH)]
pub async fn register(
	State(session): State<SessionStore>,
	Json(auth): Json<model::RegisterInput>,
) -> Result<Json<SessionRecord>, RouteError> {
	Ok(Json(session.register(&auth.email, auth.name.trim()).await?))
}

/// Log out
/// Signs out of the current session.
#[route(tag = tag::AUTH, response(status = 204, description = "Logged out successfully."))]
pub async fn logout(
	State(store): State<SessionStore>,
	_session: Session,
) -> Result<impl IntoApiResponse, RouteError> {
	store.logout().await?;

	Ok(StatusCode::NO_CONTENT.into_response())
}

/// Get user
/// Returns the signed-in user.
#[route(tag = tag::AUTH)]
pub async fn get_me(session: Session) -> Json<User> {
	Json(session.user)
}
