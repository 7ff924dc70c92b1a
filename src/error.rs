use std::{convert::Infallible, fmt};

use axum::{
	extract::rejection::PathRejection,
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use axum_jsonschema::JsonSchemaRejection;
use schemars::JsonSchema;
use serde::Serialize;

use crate::persist;

pub type Map = serde_json::Map<String, serde_json::Value>;

/// A single error message sent to the client.
#[derive(Debug, Serialize, JsonSchema)]
pub struct Message {
	/// A machine-readable code or a human-readable explanation.
	pub content: String,
	/// The input field that caused the error, if any.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub field: Option<String>,
	/// Extra context, such as the id that could not be found.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<Map>,
}

impl Message {
	pub fn new(content: impl Into<String>) -> Self {
		Self {
			content: content.into(),
			field: None,
			details: None,
		}
	}

	pub fn field(mut self, field: impl Into<String>) -> Self {
		self.field = Some(field.into());
		self
	}

	pub fn detail(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
		self.details
			.get_or_insert_with(Map::new)
			.insert(key.into(), value.into());
		self
	}

	pub fn into_vec(self) -> Vec<Self> {
		vec![self]
	}
}

/// The body of every error response.
#[derive(Debug, Serialize, JsonSchema)]
pub struct ErrorResponse {
	pub success: bool,
	pub errors: Vec<Message>,
}

impl ErrorResponse {
	fn with_status(self, status: StatusCode) -> Response {
		(status, Json(self)).into_response()
	}
}

/// Describes how a route-specific error is presented to the client.
pub trait ErrorShape: fmt::Debug {
	fn status(&self) -> StatusCode;

	fn into_errors(self) -> Vec<Message>;
}

impl ErrorShape for Infallible {
	fn status(&self) -> StatusCode {
		match *self {}
	}

	fn into_errors(self) -> Vec<Message> {
		match self {}
	}
}

/// Errors raised by the framework layer rather than a specific route.
///
/// The Display trait is not sent to the client, so it can show
/// sensitive information.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
	#[error("validation error: {0}")]
	Validation(#[from] validator::ValidationErrors),
	#[error("invalid json body")]
	Json(JsonSchemaRejection),
	#[error("path error: {0}")]
	Path(#[from] PathRejection),
	#[error("persistence error: {0}")]
	Persist(#[from] persist::Error),
}

impl From<JsonSchemaRejection> for AppError {
	fn from(rejection: JsonSchemaRejection) -> Self {
		Self::Json(rejection)
	}
}

impl IntoResponse for AppError {
	fn into_response(self) -> Response {
		match self {
			Self::Validation(errors) => ErrorResponse {
				success: false,
				errors: errors
					.field_errors()
					.into_iter()
					.flat_map(|(field, errors)| {
						let field = field.to_string();

						errors.iter().map(move |error| {
							let content = error
								.message
								.as_ref()
								.unwrap_or(&error.code)
								.to_string();

							Message::new(content).field(field.clone())
						})
					})
					.collect(),
			}
			.with_status(StatusCode::BAD_REQUEST),
			Self::Json(rejection) => rejection.into_response(),
			Self::Path(rejection) => ErrorResponse {
				success: false,
				errors: Message::new(rejection.body_text()).into_vec(),
			}
			.with_status(StatusCode::BAD_REQUEST),
			Self::Persist(error) => {
				tracing::error!(%error, "failed to persist state");

				ErrorResponse {
					success: false,
					errors: Vec::new(),
				}
				.with_status(StatusCode::INTERNAL_SERVER_ERROR)
			}
		}
	}
}

/// The error type returned from route handlers.
///
/// Either a framework-level [`AppError`] or an error specific to the route module.
#[derive(Debug)]
pub enum RouteError<E> {
	App(AppError),
	Route(E),
}

impl<E: ErrorShape> From<E> for RouteError<E> {
	fn from(error: E) -> Self {
		Self::Route(error)
	}
}

impl<E> From<AppError> for RouteError<E> {
	fn from(error: AppError) -> Self {
		Self::App(error)
	}
}

impl<E> From<persist::Error> for RouteError<E> {
	fn from(error: persist::Error) -> Self {
		Self::App(error.into())
	}
}

impl<E: ErrorShape> IntoResponse for RouteError<E> {
	fn into_response(self) -> Response {
		match self {
			Self::App(error) => error.into_response(),
			Self::Route(error) => {
				let status = error.status();

				ErrorResponse {
					success: false,
					errors: error.into_errors(),
				}
				.with_status(status)
			}
		}
	}
}

impl<E> aide::OperationOutput for RouteError<E> {
	type Inner = ErrorResponse;
}

#[cfg(test)]
mod test {
	use super::*;

	#[derive(Debug)]
	struct Missing(i64);

	impl ErrorShape for Missing {
		fn status(&self) -> StatusCode {
			StatusCode::NOT_FOUND
		}

		fn into_errors(self) -> Vec<Message> {
			Message::new("missing").detail("id", self.0).into_vec()
		}
	}

	#[test]
	fn test_message_builder() {
		let message = Message::new("unknown_post")
			.field("id")
			.detail("post", 7);

		let value = serde_json::to_value(&message).unwrap();

		assert_eq!(value["content"], "unknown_post");
		assert_eq!(value["field"], "id");
		assert_eq!(value["details"]["post"], 7);
	}

	#[test]
	fn test_message_skips_empty_fields() {
		let value = serde_json::to_value(Message::new("oops")).unwrap();

		assert!(value.get("field").is_none());
		assert!(value.get("details").is_none());
	}

	#[test]
	fn test_route_error_status() {
		let response = RouteError::from(Missing(3)).into_response();

		assert_eq!(response.status(), StatusCode::NOT_FOUND);
	}

	#[tokio::test]
	async fn test_validation_errors_name_the_field() {
		use validator::Validate;

		#[derive(Validate)]
		struct Input {
			#[validate(length(min = 5))]
			title: String,
		}

		let errors = Input { title: "Hey".into() }.validate().unwrap_err();
		let response = AppError::from(errors).into_response();

		assert_eq!(response.status(), StatusCode::BAD_REQUEST);

		let body = axum::body::to_bytes(response.into_body(), usize::MAX)
			.await
			.unwrap();
		let value = serde_json::from_slice::<serde_json::Value>(&body).unwrap();

		assert_eq!(value["success"], false);
		assert_eq!(value["errors"][0]["field"], "title");
		assert_eq!(value["errors"][0]["content"], "length");
	}
}
