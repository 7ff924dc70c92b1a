use std::sync::Arc;

use aide::openapi::OpenApi;
use axum::{
	response::{IntoResponse, Response},
	routing::get,
	Extension, Router,
};

use crate::AppState;

/// Serves the generated `OpenAPI` document.
///
/// The document itself is attached as an [`Extension`] once the API router is finished.
pub fn routes() -> Router<AppState> {
	Router::new().route("/docs/api.json", get(serve_docs))
}

async fn serve_docs(Extension(api): Extension<Arc<OpenApi>>) -> Response {
	axum::Json(&*api).into_response()
}

#[cfg(test)]
mod test {
	use crate::test::*;

	#[tokio::test]
	async fn test_serves_openapi_document() {
		let app = app(state());

		let response = app.get("/docs/api.json").await;

		assert_eq!(response.status_code(), 200);

		let api = response.json::<Value>();

		assert_eq!(api["info"]["title"], "Pressroom");
		assert!(api["paths"]["/api/auth/login"]["post"].is_object());
		assert!(api["paths"]["/api/theme/toggle"]["post"].is_object());
		assert!(api["paths"].as_object().unwrap().len() >= 8);
	}
}
