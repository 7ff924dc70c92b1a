use std::fmt;

use chrono::{DateTime, Utc};
use macros::model;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// The longest tag accepted from a client.
pub const MAX_TAG_LENGTH: usize = 32;

fn validate_tags(tags: &[String]) -> Result<(), ValidationError> {
	if tags.iter().all(|tag| tag.trim().is_empty()) {
		return Err(ValidationError::new("at least one tag is required"));
	}

	if tags.iter().any(|tag| tag.trim().chars().count() > MAX_TAG_LENGTH) {
		return Err(ValidationError::new("tags must be at most 32 characters"));
	}

	Ok(())
}

/// Trims every tag and drops the blank ones.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
	tags.into_iter()
		.map(|tag| tag.trim().to_owned())
		.filter(|tag| !tag.is_empty())
		.collect()
}

/// The fixed set of categories a post can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Category {
	Technology,
	Development,
	Design,
	#[serde(rename = "Best Practices")]
	BestPractices,
}

impl Category {
	pub const ALL: [Self; 4] = [
		Self::Technology,
		Self::Development,
		Self::Design,
		Self::BestPractices,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Technology => "Technology",
			Self::Development => "Development",
			Self::Design => "Design",
			Self::BestPractices => "Best Practices",
		}
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// The category filter applied to the post listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum CategoryFilter {
	#[default]
	All,
	Technology,
	Development,
	Design,
	#[serde(rename = "Best Practices")]
	BestPractices,
}

impl CategoryFilter {
	pub fn matches(self, category: Category) -> bool {
		match self {
			Self::All => true,
			Self::Technology => category == Category::Technology,
			Self::Development => category == Category::Development,
			Self::Design => category == Category::Design,
			Self::BestPractices => category == Category::BestPractices,
		}
	}
}

impl From<Category> for CategoryFilter {
	fn from(category: Category) -> Self {
		match category {
			Category::Technology => Self::Technology,
			Category::Development => Self::Development,
			Category::Design => Self::Design,
			Category::BestPractices => Self::BestPractices,
		}
	}
}

/// A comment left on a post. Comments are never edited or removed on their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
	pub id: String,
	pub text: String,
	pub author: String,
	pub created_at: DateTime<Utc>,
}

/// A single blog post.
#[model(create, update)]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Post {
	/// The unique identifier of the post, derived from its creation time.
	#[serde(skip_deserializing)]
	pub id: i64,
	/// The user that created the post.
	#[serde(skip_deserializing)]
	pub user_id: u64,
	/// The title of the post.
	#[validate(length(min = 5, max = 128))]
	pub title: String,
	/// The content of the post as HTML. Clients must sanitize it before rendering.
	#[validate(length(min = 20))]
	pub body: String,
	/// A placeholder cover image.
	#[serde(skip_deserializing)]
	pub image: String,
	pub category: Category,
	/// Free-form tags, in the order they were entered.
	#[validate(custom(function = "validate_tags"))]
	pub tags: Vec<String>,
	#[serde(skip_deserializing)]
	pub likes: u64,
	#[serde(skip_deserializing)]
	pub comments: Vec<Comment>,
}

/// An authenticated user. Authentication is mocked, so there is only ever one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct User {
	pub id: u64,
	pub name: String,
	pub email: String,
}

/// The persisted session record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
	pub user: Option<User>,
	pub token: Option<String>,
	pub is_authenticated: bool,
}

impl SessionRecord {
	/// The user and token of a complete signed-in record.
	///
	/// A record missing either one counts as signed out, whatever its flag says.
	pub fn signed_in(self) -> Option<(User, String)> {
		match self {
			Self {
				user: Some(user),
				token: Some(token),
				is_authenticated: true,
			} => Some((user, token)),
			_ => None,
		}
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
	#[default]
	Light,
	Dark,
}

impl ThemeMode {
	pub fn toggled(self) -> Self {
		match self {
			Self::Light => Self::Dark,
			Self::Dark => Self::Light,
		}
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreset {
	#[default]
	Default,
	Matcha,
	Bw,
	Rose,
	Sunset,
}

/// The persisted theme record, applied by clients as a document-level attribute.
#[model(patch)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema, Validate)]
pub struct Theme {
	pub mode: ThemeMode,
	pub preset: ThemePreset,
}

#[cfg(test)]
mod test {
	use validator::Validate;

	use super::*;

	fn input(tags: &[&str]) -> CreatePostInput {
		CreatePostInput {
			title: "A valid title".into(),
			body: "A body that is long enough to pass.".into(),
			category: Category::Design,
			tags: tags.iter().map(|t| (*t).to_owned()).collect(),
		}
	}

	#[test]
	fn test_category_wire_names() {
		assert_eq!(
			serde_json::to_value(Category::BestPractices).unwrap(),
			"Best Practices"
		);
		assert_eq!(
			serde_json::from_str::<CategoryFilter>(r#""All""#).unwrap(),
			CategoryFilter::All
		);
	}

	#[test]
	fn test_category_filter_matches() {
		assert!(CategoryFilter::All.matches(Category::Design));
		assert!(CategoryFilter::Design.matches(Category::Design));
		assert!(!CategoryFilter::Design.matches(Category::Technology));

		for category in Category::ALL {
			assert!(CategoryFilter::from(category).matches(category));
		}
	}

	#[test]
	fn test_post_input_validation() {
		assert!(input(&["rust"]).validate().is_ok());
		assert!(input(&[" ", ""]).validate().is_err());
		assert!(input(&[]).validate().is_err());
		assert!(input(&["x".repeat(MAX_TAG_LENGTH + 1).as_str()])
			.validate()
			.is_err());

		let mut short = input(&["rust"]);
		short.title = "Hey".into();

		assert!(short.validate().is_err());
	}

	#[test]
	fn test_normalize_tags() {
		let tags = normalize_tags(vec![" rust ".into(), "".into(), "axum".into()]);

		assert_eq!(tags, vec!["rust", "axum"]);
	}

	#[test]
	fn test_theme_defaults() {
		let theme = Theme::default();

		assert_eq!(
			serde_json::to_value(theme).unwrap(),
			serde_json::json!({ "mode": "light", "preset": "default" })
		);
		assert_eq!(theme.mode.toggled(), ThemeMode::Dark);
		assert_eq!(
			serde_json::from_str::<ThemePreset>(r#""default""#).unwrap(),
			ThemePreset::Default
		);
	}

	#[test]
	fn test_session_record_layout() {
		let value = serde_json::to_value(SessionRecord::default()).unwrap();

		assert_eq!(
			value,
			serde_json::json!({ "user": null, "token": null, "isAuthenticated": false })
		);
	}
}
