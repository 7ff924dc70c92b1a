use axum::{
	extract::{Path, State},
	http::StatusCode,
	response::{IntoResponse, Redirect, Response},
	Json,
};

use crate::{
	model::Category,
	store::{PostStore, SessionStore, ThemeStore},
};

use super::{model, DASHBOARD_PATH};

pub async fn login(
	State(theme): State<ThemeStore>,
	State(session): State<SessionStore>,
) -> Json<model::AuthPage> {
	Json(model::AuthPage {
		theme: theme.current(),
		user: session.user(),
	})
}

pub async fn dashboard(
	State(theme): State<ThemeStore>,
	State(session): State<SessionStore>,
	State(posts): State<PostStore>,
) -> Json<model::DashboardPage> {
	posts.fetch_posts().await;

	Json(model::DashboardPage {
		theme: theme.current(),
		user: session.user(),
		view: posts.view(),
	})
}

pub async fn create_post(
	State(theme): State<ThemeStore>,
	State(session): State<SessionStore>,
) -> Json<model::CreatePage> {
	Json(model::CreatePage {
		theme: theme.current(),
		user: session.user(),
		categories: Category::ALL.to_vec(),
	})
}

pub async fn post_detail(
	State(theme): State<ThemeStore>,
	State(session): State<SessionStore>,
	State(posts): State<PostStore>,
	Path(id): Path<i64>,
) -> Response {
	posts.fetch_posts().await;

	let Some(post) = posts.get_post(id) else {
		let page = model::NotFoundPage {
			theme: theme.current(),
			message: model::NOT_FOUND_MESSAGE,
			back: DASHBOARD_PATH,
		};

		return (StatusCode::NOT_FOUND, Json(page)).into_response();
	};

	Json(model::DetailPage {
		theme: theme.current(),
		user: session.user(),
		post,
	})
	.into_response()
}

pub async fn edit_post(
	State(theme): State<ThemeStore>,
	State(session): State<SessionStore>,
	State(posts): State<PostStore>,
	Path(id): Path<i64>,
) -> Response {
	posts.fetch_posts().await;

	let Some(post) = posts.get_post(id) else {
		return Redirect::to(DASHBOARD_PATH).into_response();
	};

	Json(model::EditPage {
		theme: theme.current(),
		user: session.user(),
		form: post.into(),
		categories: Category::ALL.to_vec(),
	})
	.into_response()
}
