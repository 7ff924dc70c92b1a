#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod extract;
pub mod guard;
pub mod model;
pub mod openapi;
pub mod persist;
pub mod route;
pub mod store;
pub mod trace;

#[cfg(test)]
mod test;

use std::sync::Arc;

use aide::{axum::ApiRouter, openapi::OpenApi};
use axum::{Extension, Router};
use tower_http::trace::TraceLayer;

use crate::{
	config::Config,
	persist::{FileStorage, MemoryStorage, Storage},
	store::{PostStore, SeedPosts, SessionStore, ThemeStore},
};

pub use error::AppError;

pub type AppState = State;

/// The shared application state.
///
/// Each store is cheap to clone and shares its data between clones, so handlers
/// extract only the store they need.
#[derive(Clone, axum::extract::FromRef)]
pub struct State {
	pub posts: PostStore,
	pub session: SessionStore,
	pub theme: ThemeStore,
}

impl State {
	/// Builds the state from the configuration, restoring the session and theme
	/// from `storage_dir` when one is set.
	pub fn new(config: &Config) -> Self {
		let storage: Arc<dyn Storage> = match &config.storage_dir {
			Some(dir) => Arc::new(FileStorage::new(dir)),
			None => Arc::new(MemoryStorage::default()),
		};

		Self::with_storage(config, storage)
	}

	pub fn with_storage(config: &Config, storage: Arc<dyn Storage>) -> Self {
		Self {
			posts: PostStore::new(Arc::new(SeedPosts), config.latency(), config.page_size),
			session: SessionStore::restore(storage.clone()),
			theme: ThemeStore::restore(storage),
		}
	}
}

/// Assembles the documented API, the pages and the docs endpoint into one router.
pub fn app(state: AppState) -> Router {
	aide::gen::extract_schemas(true);

	let mut api = OpenApi::default();

	ApiRouter::new()
		.nest("/api/auth", route::auth::routes())
		.nest("/api/posts", route::post::routes())
		.nest("/api/theme", route::theme::routes())
		.finish_api_with(&mut api, openapi::docs)
		.merge(route::page::routes(state.clone()))
		.merge(route::docs::routes())
		.layer(Extension(Arc::new(api)))
		.layer(TraceLayer::new_for_http())
		.with_state(state)
}
