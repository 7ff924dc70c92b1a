use serde::Serialize;

use crate::{
	model::{Category, Post, Theme, User},
	store::View,
};

pub const NOT_FOUND_MESSAGE: &str = "Post not found";

#[derive(Debug, Serialize)]
pub struct AuthPage {
	pub theme: Theme,
	pub user: Option<User>,
}

#[derive(Debug, Serialize)]
pub struct DashboardPage {
	pub theme: Theme,
	pub user: Option<User>,
	#[serde(flatten)]
	pub view: View,
}

#[derive(Debug, Serialize)]
pub struct CreatePage {
	pub theme: Theme,
	pub user: Option<User>,
	pub categories: Vec<Category>,
}

#[derive(Debug, Serialize)]
pub struct DetailPage {
	pub theme: Theme,
	pub user: Option<User>,
	pub post: Post,
}

/// The edit form, prefilled from an existing post.
///
/// Tags are shown as a single comma-separated field.
#[derive(Debug, Serialize)]
pub struct EditForm {
	pub id: i64,
	pub title: String,
	pub body: String,
	pub category: Category,
	pub tags: String,
}

impl From<Post> for EditForm {
	fn from(post: Post) -> Self {
		Self {
			id: post.id,
			title: post.title,
			body: post.body,
			category: post.category,
			tags: post.tags.join(", "),
		}
	}
}

#[derive(Debug, Serialize)]
pub struct EditPage {
	pub theme: Theme,
	pub user: Option<User>,
	pub form: EditForm,
	pub categories: Vec<Category>,
}

#[derive(Debug, Serialize)]
pub struct NotFoundPage {
	pub theme: Theme,
	pub message: &'static str,
	pub back: &'static str,
}
