use schemars::JsonSchema;
use serde::Deserialize;
use validator::Validate;

pub use crate::{
	model::{CategoryFilter, Comment, CreatePostInput, Post, UpdatePostInput},
	store::View,
};

/// Changes to the listing, applied in field order: search, category, then page.
#[derive(Debug, Default, Deserialize, Validate, JsonSchema)]
pub struct ViewInput {
	/// Replaces the search query and goes back to the first page.
	#[validate(length(max = 128))]
	pub search: Option<String>,
	/// Replaces the category filter and goes back to the first page.
	pub category: Option<CategoryFilter>,
	/// The page to show (1-indexed).
	#[validate(range(min = 1))]
	pub page: Option<usize>,
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct CommentInput {
	#[validate(length(min = 1, max = 2000))]
	pub text: String,
}
