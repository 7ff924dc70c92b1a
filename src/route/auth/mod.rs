use aide::axum::{
	routing::{get_with, post_with},
	ApiRouter,
};
use axum::http::StatusCode;

use crate::{error, AppState};

pub mod model;
pub mod route;

/// An error that can occur during authentication.
///
/// Note that the messages are presented to the client, so they should not contain
/// sensitive information.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("not signed in")]
	Unauthenticated,
}

pub type RouteError = error::RouteError<Error>;

pub fn routes() -> ApiRouter<AppState> {
	use route::*;

	ApiRouter::new()
		.api_route("/login", post_with(login, login_docs))
		.api_route("/register", post_with(register, register_docs))
		.api_route("/logout", post_with(logout, logout_docs))
		.api_route("/me", get_with(get_me, get_me_docs))
}

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::Unauthenticated => StatusCode::UNAUTHORIZED,
		}
	}

	fn into_errors(self) -> Vec<error::Message> {
		error::Message::new(self.to_string()).into_vec()
	}
}

#[cfg(test)]
mod test {
	use crate::test::*;

	#[tokio::test]
	async fn test_login_flow() {
		let app = app(state());

		let response = app.get("/api/auth/me").await;

		assert_eq!(response.status_code(), 401);
		assert_eq!(response.json::<Value>()["errors"][0]["content"], "not signed in");

		let response = app
			.post("/api/auth/login")
			.json(&json!({ "email": "john@smith.com" }))
			.await;

		assert_eq!(response.status_code(), 200);

		let session = response.json::<Value>();

		assert_eq!(session["isAuthenticated"], true);
		assert_eq!(session["user"]["email"], "john@smith.com");
		assert!(session["token"].as_str().unwrap().starts_with("mock-token-"));

		let response = app.get("/api/auth/me").await;

		assert_eq!(response.status_code(), 200);
		assert_eq!(response.json::<Value>()["name"], "User");

		let response = app.post("/api/auth/logout").await;

		assert_eq!(response.status_code(), 204);
		assert_eq!(app.get("/api/auth/me").await.status_code(), 401);
	}

	#[tokio::test]
	async fn test_register_flow() {
		let app = app(state());

		let response = app
			.post("/api/auth/register")
			.json(&json!({ "email": "john@smith.com", "name": "  John " }))
			.await;

		assert_eq!(response.status_code(), 200);
		assert_eq!(response.json::<Value>()["user"]["name"], "John");

		let response = app.get("/api/auth/me").await;

		assert_eq!(response.json::<Value>()["name"], "John");
	}

	#[tokio::test]
	async fn test_login_validation() {
		let app = app(state());

		let response = app
			.post("/api/auth/login")
			.json(&json!({ "email": "not an email" }))
			.await;

		assert!(response.status_code().is_client_error());

		let response = app
			.post("/api/auth/register")
			.json(&json!({ "email": "john@smith.com", "name": "" }))
			.await;

		assert!(response.status_code().is_client_error());

		let response = app
			.post("/api/auth/register")
			.json(&json!({ "email": "john@smith.com", "name": "    " }))
			.await;

		assert_eq!(response.status_code(), 400);
		assert_eq!(response.json::<Value>()["errors"][0]["field"], "name");
		assert_eq!(app.get("/api/auth/me").await.status_code(), 401);
	}

	#[tokio::test]
	async fn test_session_is_persisted() {
		let storage = memory_storage();
		let first = app(state_with(storage.clone()));

		first
			.post("/api/auth/login")
			.json(&json!({ "email": "john@smith.com" }))
			.await;

		let restarted = app(state_with(storage));

		assert_eq!(restarted.get("/api/auth/me").await.status_code(), 200);
	}

	#[tokio::test]
	async fn test_failed_save_keeps_session() {
		// A file where the storage directory should be makes every save fail
		let file = tempfile::NamedTempFile::new().unwrap();
		let app = app(state_with(file_storage(file.path())));

		let response = app
			.post("/api/auth/login")
			.json(&json!({ "email": "john@smith.com" }))
			.await;

		assert_eq!(response.status_code(), 500);
		assert_eq!(
			response.json::<Value>(),
			json!({ "success": false, "errors": [] })
		);

		let response = app.get("/api/auth/me").await;

		assert_eq!(response.status_code(), 200);
		assert_eq!(response.json::<Value>()["email"], "john@smith.com");
	}
}
