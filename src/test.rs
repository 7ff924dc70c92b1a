use std::{path::Path, sync::Arc};

pub use axum_test::TestServer;
pub use serde_json::{json, Value};

use crate::{
	config::Config,
	persist::{FileStorage, MemoryStorage, Storage},
	AppState, State,
};

/// A configuration without simulated latency.
pub fn config() -> Config {
	Config {
		fetch_delay_ms: 0,
		mutation_delay_ms: 0,
		..Config::default()
	}
}

pub fn state() -> AppState {
	state_with(memory_storage())
}

pub fn state_with(storage: Arc<dyn Storage>) -> AppState {
	State::with_storage(&config(), storage)
}

pub fn memory_storage() -> Arc<MemoryStorage> {
	Arc::new(MemoryStorage::default())
}

pub fn file_storage(dir: &Path) -> Arc<FileStorage> {
	Arc::new(FileStorage::new(dir))
}

pub fn app(state: AppState) -> TestServer {
	TestServer::new(crate::app(state)).unwrap()
}
