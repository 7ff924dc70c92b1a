use std::convert::Infallible;

use aide::axum::{
	routing::{get_with, post_with},
	ApiRouter,
};

use crate::{error, AppState};

pub mod route;

/// Theme changes only fail when they cannot be saved.
pub type RouteError = error::RouteError<Infallible>;

pub fn routes() -> ApiRouter<AppState> {
	use route::*;

	ApiRouter::new()
		.api_route(
			"/",
			get_with(get_theme, get_theme_docs).patch_with(update_theme, update_theme_docs),
		)
		.api_route("/toggle", post_with(toggle_mode, toggle_mode_docs))
}

#[cfg(test)]
mod test {
	use crate::test::*;

	#[tokio::test]
	async fn test_theme_defaults() {
		let app = app(state());

		let theme = app.get("/api/theme").await.json::<Value>();

		assert_eq!(theme, json!({ "mode": "light", "preset": "default" }));
	}

	#[tokio::test]
	async fn test_toggle_and_patch() {
		let app = app(state());

		let theme = app.post("/api/theme/toggle").await.json::<Value>();

		assert_eq!(theme["mode"], "dark");

		let theme = app
			.patch("/api/theme")
			.json(&json!({ "preset": "rose" }))
			.await
			.json::<Value>();

		assert_eq!(theme, json!({ "mode": "dark", "preset": "rose" }));

		let response = app
			.patch("/api/theme")
			.json(&json!({ "preset": "neon" }))
			.await;

		assert!(response.status_code().is_client_error());
	}

	#[tokio::test]
	async fn test_theme_is_persisted() {
		let dir = tempfile::tempdir().unwrap();
		let storage = file_storage(dir.path());

		app(state_with(storage.clone()))
			.patch("/api/theme")
			.json(&json!({ "mode": "dark", "preset": "matcha" }))
			.await;

		let theme = app(state_with(storage))
			.get("/api/theme")
			.await
			.json::<Value>();

		assert_eq!(theme, json!({ "mode": "dark", "preset": "matcha" }));
		assert!(dir.path().join("theme-storage.json").exists());
	}
}
