//! Keeps signed-out visitors away from private pages.

use axum::{
	extract::{Request, State},
	middleware::Next,
	response::{IntoResponse, Redirect, Response},
};

use crate::store::SessionStore;

pub const LOGIN_PATH: &str = "/login";

/// Middleware that sends unauthenticated visitors to the login page
/// instead of running the wrapped handler.
///
/// ```rust,ignore
/// Router::new()
///   .route("/dashboard", get(dashboard))
///   .route_layer(middleware::from_fn_with_state(state, guard::require_session));
/// ```
pub async fn require_session(
	State(session): State<SessionStore>,
	request: Request,
	next: Next,
) -> Response {
	if !session.is_signed_in() {
		tracing::debug!(path = %request.uri().path(), "redirecting to login");

		return Redirect::to(LOGIN_PATH).into_response();
	}

	next.run(request).await
}
