//! Page view models.
//!
//! Every page carries the current theme so the client can apply it before rendering.
//! Everything except the sign-in pages sits behind [`guard::require_session`].

use axum::{middleware, routing::get, Router};

use crate::{guard, AppState};

pub mod model;
pub mod route;

pub const DASHBOARD_PATH: &str = "/dashboard";

pub fn routes(state: AppState) -> Router<AppState> {
	use route::*;

	let private = Router::new()
		.route(DASHBOARD_PATH, get(dashboard))
		.route("/posts/create", get(create_post))
		.route("/posts/:id", get(post_detail))
		.route("/posts/:id/edit", get(edit_post))
		.route_layer(middleware::from_fn_with_state(state, guard::require_session));

	Router::new()
		.route(guard::LOGIN_PATH, get(login))
		.route("/register", get(login))
		.merge(private)
}
