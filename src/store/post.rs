use std::{
	sync::{
		atomic::{AtomicUsize, Ordering},
		Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
	},
	time::Duration,
};

use chrono::Utc;
use schemars::JsonSchema;
use serde::Serialize;

use crate::model::{Category, CategoryFilter, Comment, Post};

use super::{Error, PostSource};

/// The id of the only (mocked) user, who owns every new post.
pub const AUTHOR_ID: u64 = 1;

/// Shown to clients when the initial load fails.
pub const FETCH_ERROR: &str = "Failed to fetch posts";

/// Simulated network latency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Latency {
	/// Delay before the initial load completes.
	pub fetch: Duration,
	/// Delay before an add, update or delete is applied.
	pub mutation: Duration,
}

/// A single page of the filtered listing.
#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page {
	pub posts: Vec<Post>,
	pub total_pages: usize,
	pub current_page: usize,
}

/// Everything a listing needs to render, captured at one point in time.
#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct View {
	pub posts: Vec<Post>,
	pub total_pages: usize,
	pub current_page: usize,
	pub search_query: String,
	pub selected_category: CategoryFilter,
	pub loading: bool,
	pub error: Option<String>,
}

#[derive(Debug)]
struct Inner {
	posts: Vec<Post>,
	error: Option<String>,
	search_query: String,
	selected_category: CategoryFilter,
	current_page: usize,
	last_id: i64,
}

impl Inner {
	/// Returns a creation-time id that is strictly greater than any handed out before.
	fn next_id(&mut self) -> i64 {
		let id = Utc::now().timestamp_millis().max(self.last_id + 1);

		self.last_id = id;
		id
	}

	fn post_mut(&mut self, id: i64) -> Option<&mut Post> {
		self.posts.iter_mut().find(|post| post.id == id)
	}

	fn filtered(&self) -> Vec<Post> {
		let query = self.search_query.to_lowercase();

		self.posts
			.iter()
			.filter(|post| {
				post.title.to_lowercase().contains(&query)
					|| post.body.to_lowercase().contains(&query)
			})
			.filter(|post| self.selected_category.matches(post.category))
			.cloned()
			.collect()
	}

	fn page(&self, page_size: usize) -> Page {
		let filtered = self.filtered();
		let total_pages = filtered.len().div_ceil(page_size);
		let start = self.current_page.saturating_sub(1).saturating_mul(page_size);

		Page {
			posts: filtered.into_iter().skip(start).take(page_size).collect(),
			total_pages,
			current_page: self.current_page,
		}
	}
}

/// Marks a simulated operation as in flight until dropped.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
	fn start(counter: &'a AtomicUsize) -> Self {
		counter.fetch_add(1, Ordering::SeqCst);
		Self(counter)
	}
}

impl Drop for InFlight<'_> {
	fn drop(&mut self) {
		self.0.fetch_sub(1, Ordering::SeqCst);
	}
}

/// The working set of posts, plus the search, category and page the listing is showing.
///
/// Cloning is cheap and every clone shares the same collection. Reads never
/// mutate the collection; the filtered and paginated views are recomputed on
/// every call.
#[derive(Clone)]
pub struct PostStore {
	inner: Arc<RwLock<Inner>>,
	in_flight: Arc<AtomicUsize>,
	source: Arc<dyn PostSource>,
	latency: Latency,
	page_size: usize,
}

impl PostStore {
	pub fn new(source: Arc<dyn PostSource>, latency: Latency, page_size: usize) -> Self {
		Self {
			inner: Arc::new(RwLock::new(Inner {
				posts: Vec::new(),
				error: None,
				search_query: String::new(),
				selected_category: CategoryFilter::All,
				current_page: 1,
				last_id: 0,
			})),
			in_flight: Arc::new(AtomicUsize::new(0)),
			source,
			latency,
			page_size: page_size.max(1),
		}
	}

	fn read(&self) -> RwLockReadGuard<'_, Inner> {
		self.inner.read().unwrap_or_else(PoisonError::into_inner)
	}

	fn write(&self) -> RwLockWriteGuard<'_, Inner> {
		self.inner.write().unwrap_or_else(PoisonError::into_inner)
	}

	/// Loads the seed collection, unless posts are already present.
	///
	/// A failed load leaves the collection empty and sets [`PostStore::error`],
	/// so calling this again retries.
	pub async fn fetch_posts(&self) {
		{
			let mut inner = self.write();

			if !inner.posts.is_empty() {
				tracing::debug!(count = inner.posts.len(), "posts already loaded");
				return;
			}

			inner.error = None;
		}

		let _in_flight = InFlight::start(&self.in_flight);
		tokio::time::sleep(self.latency.fetch).await;

		match self.source.load() {
			Ok(seed) => {
				let mut inner = self.write();

				if inner.posts.is_empty() {
					inner.posts = seed;
				} else {
					// Posts were added while loading; keep them in front of the seed
					let missing = seed
						.into_iter()
						.filter(|post| inner.posts.iter().all(|p| p.id != post.id))
						.collect::<Vec<_>>();

					inner.posts.extend(missing);
				}

				let last_id = inner.posts.iter().map(|post| post.id).max().unwrap_or(0);

				inner.last_id = inner.last_id.max(last_id);
				inner.error = None;

				tracing::info!(count = inner.posts.len(), "loaded posts");
			}
			Err(error) => {
				tracing::warn!(%error, "failed to fetch posts");
				self.write().error = Some(FETCH_ERROR.into());
			}
		}
	}

	/// Creates a post at the head of the collection and returns it.
	///
	/// Input is not validated here.
	pub async fn add_post(
		&self,
		title: String,
		body: String,
		category: Category,
		tags: Vec<String>,
	) -> Post {
		let _in_flight = InFlight::start(&self.in_flight);
		tokio::time::sleep(self.latency.mutation).await;

		let mut inner = self.write();
		let id = inner.next_id();
		let post = Post {
			id,
			user_id: AUTHOR_ID,
			title,
			body,
			image: format!("https://picsum.photos/seed/{id}/800/400"),
			category,
			tags,
			likes: 0,
			comments: Vec::new(),
		};

		inner.posts.insert(0, post.clone());
		tracing::info!(id, "added post");

		post
	}

	/// Replaces the editable fields of a post. Returns `None` if it does not exist.
	pub async fn update_post(
		&self,
		id: i64,
		title: String,
		body: String,
		category: Category,
		tags: Vec<String>,
	) -> Option<Post> {
		let _in_flight = InFlight::start(&self.in_flight);
		tokio::time::sleep(self.latency.mutation).await;

		let mut inner = self.write();
		let post = inner.post_mut(id)?;

		post.title = title;
		post.body = body;
		post.category = category;
		post.tags = tags;

		tracing::info!(id, "updated post");
		Some(post.clone())
	}

	/// Removes a post. Returns whether anything was removed.
	pub async fn delete_post(&self, id: i64) -> bool {
		let _in_flight = InFlight::start(&self.in_flight);
		tokio::time::sleep(self.latency.mutation).await;

		let mut inner = self.write();
		let before = inner.posts.len();

		inner.posts.retain(|post| post.id != id);

		let removed = inner.posts.len() != before;

		if removed {
			tracing::info!(id, "deleted post");
		}

		removed
	}

	pub fn like_post(&self, id: i64) -> Option<Post> {
		let mut inner = self.write();
		let post = inner.post_mut(id)?;

		post.likes += 1;
		Some(post.clone())
	}

	/// Appends a comment to a post.
	///
	/// Blank text is rejected. An unknown post is ignored and yields `Ok(None)`.
	pub fn add_comment(&self, post_id: i64, text: &str, author: &str) -> Result<Option<Comment>, Error> {
		let text = text.trim();

		if text.is_empty() {
			return Err(Error::EmptyComment);
		}

		let mut inner = self.write();

		if inner.post_mut(post_id).is_none() {
			return Ok(None);
		}

		let comment = Comment {
			id: inner.next_id().to_string(),
			text: text.into(),
			author: author.into(),
			created_at: Utc::now(),
		};

		if let Some(post) = inner.post_mut(post_id) {
			post.comments.push(comment.clone());
		}

		tracing::info!(post_id, comment_id = %comment.id, "added comment");
		Ok(Some(comment))
	}

	pub fn get_post(&self, id: i64) -> Option<Post> {
		self.read().posts.iter().find(|post| post.id == id).cloned()
	}

	pub fn len(&self) -> usize {
		self.read().posts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.read().posts.is_empty()
	}

	/// The whole collection, newest first.
	pub fn posts(&self) -> Vec<Post> {
		self.read().posts.clone()
	}

	/// Posts whose title or body contains the search query (ignoring case)
	/// and whose category passes the selected filter.
	pub fn filtered_posts(&self) -> Vec<Post> {
		self.read().filtered()
	}

	pub fn paginated_posts(&self) -> Page {
		self.read().page(self.page_size)
	}

	pub fn view(&self) -> View {
		let inner = self.read();
		let page = inner.page(self.page_size);

		View {
			posts: page.posts,
			total_pages: page.total_pages,
			current_page: page.current_page,
			search_query: inner.search_query.clone(),
			selected_category: inner.selected_category,
			loading: self.loading(),
			error: inner.error.clone(),
		}
	}

	/// Sets the search query and goes back to the first page.
	pub fn set_search_query(&self, query: impl Into<String>) {
		let mut inner = self.write();

		inner.search_query = query.into();
		inner.current_page = 1;
	}

	/// Sets the category filter and goes back to the first page.
	pub fn set_selected_category(&self, category: CategoryFilter) {
		let mut inner = self.write();

		inner.selected_category = category;
		inner.current_page = 1;
	}

	/// Sets the current page as given. Pages past the end are empty.
	pub fn set_current_page(&self, page: usize) {
		self.write().current_page = page;
	}

	pub fn search_query(&self) -> String {
		self.read().search_query.clone()
	}

	pub fn selected_category(&self) -> CategoryFilter {
		self.read().selected_category
	}

	pub fn current_page(&self) -> usize {
		self.read().current_page
	}

	pub fn page_size(&self) -> usize {
		self.page_size
	}

	pub fn total_pages(&self) -> usize {
		self.read().filtered().len().div_ceil(self.page_size)
	}

	/// Whether a simulated operation is in flight.
	pub fn loading(&self) -> bool {
		self.in_flight.load(Ordering::SeqCst) > 0
	}

	/// The message from the last failed load, cleared by the next successful one.
	pub fn error(&self) -> Option<String> {
		self.read().error.clone()
	}
}
