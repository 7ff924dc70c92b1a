//! Durable records for state that must survive a restart (the session and the theme).
//!
//! Each record lives under a fixed key. Changes are written back explicitly by
//! [`Persisted::update`] right after they are applied.

use std::{
	collections::HashMap,
	fs, io,
	path::PathBuf,
	sync::{Arc, PoisonError, RwLock},
};

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("failed to access {key}: {source}")]
	Io {
		key: String,
		#[source]
		source: io::Error,
	},
	#[error("failed to encode {key}: {source}")]
	Encode {
		key: String,
		#[source]
		source: serde_json::Error,
	},
	#[error("save of {key} did not finish: {source}")]
	Task {
		key: String,
		#[source]
		source: tokio::task::JoinError,
	},
}

/// A key-value backend for persisted records.
pub trait Storage: Send + Sync {
	fn load(&self, key: &str) -> Result<Option<String>, Error>;

	fn save(&self, key: &str, value: &str) -> Result<(), Error>;
}

/// Stores each record as `{dir}/{key}.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
	dir: PathBuf,
}

impl FileStorage {
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self { dir: dir.into() }
	}

	fn path(&self, key: &str) -> PathBuf {
		self.dir.join(format!("{key}.json"))
	}
}

impl Storage for FileStorage {
	fn load(&self, key: &str) -> Result<Option<String>, Error> {
		match fs::read_to_string(self.path(key)) {
			Ok(contents) => Ok(Some(contents)),
			Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
			Err(source) => Err(Error::Io {
				key: key.into(),
				source,
			}),
		}
	}

	fn save(&self, key: &str, value: &str) -> Result<(), Error> {
		let io_error = |source| Error::Io {
			key: key.into(),
			source,
		};

		fs::create_dir_all(&self.dir).map_err(io_error)?;

		// Write next to the target and rename so a crash never leaves half a record
		let path = self.path(key);
		let tmp = path.with_extension("json.tmp");

		fs::write(&tmp, value).map_err(io_error)?;
		fs::rename(&tmp, &path).map_err(io_error)
	}
}

/// Keeps records in memory only. Used when no storage directory is configured.
#[derive(Debug, Default)]
pub struct MemoryStorage {
	records: RwLock<HashMap<String, String>>,
}

impl Storage for MemoryStorage {
	fn load(&self, key: &str) -> Result<Option<String>, Error> {
		let records = self.records.read().unwrap_or_else(PoisonError::into_inner);

		Ok(records.get(key).cloned())
	}

	fn save(&self, key: &str, value: &str) -> Result<(), Error> {
		let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);

		records.insert(key.into(), value.into());
		Ok(())
	}
}

/// A single record of type `T`, restored once and saved on every change.
///
/// Saves run on the blocking thread pool. They are serialized by `saving`, so
/// the last change applied is always the last one written.
pub struct Persisted<T> {
	key: &'static str,
	state: RwLock<T>,
	saving: Mutex<()>,
	storage: Arc<dyn Storage>,
}

impl<T> Persisted<T>
where
	T: Serialize + DeserializeOwned + Default + Clone,
{
	/// Restores the record from storage.
	///
	/// A missing record starts from `T::default()`. So does an unreadable or
	/// corrupt one, after logging a warning.
	pub fn restore(key: &'static str, storage: Arc<dyn Storage>) -> Self {
		let state = match storage.load(key) {
			Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|error| {
				tracing::warn!(key, %error, "discarding corrupt persisted record");
				T::default()
			}),
			Ok(None) => T::default(),
			Err(error) => {
				tracing::warn!(key, %error, "failed to read persisted record");
				T::default()
			}
		};

		Self {
			key,
			state: RwLock::new(state),
			saving: Mutex::new(()),
			storage,
		}
	}

	pub fn get(&self) -> T {
		self.state
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.clone()
	}

	/// Applies `f` to the record and writes the result back to storage.
	///
	/// If the write fails the in-memory change is kept and the error is returned.
	pub async fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> Result<R, Error> {
		let _saving = self.saving.lock().await;

		let (result, raw) = {
			let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
			let result = f(&mut state);

			(result, serde_json::to_string(&*state))
		};

		let raw = raw.map_err(|source| Error::Encode {
			key: self.key.into(),
			source,
		})?;

		let key = self.key;
		let storage = Arc::clone(&self.storage);

		tokio::task::spawn_blocking(move || storage.save(key, &raw))
			.await
			.map_err(|source| Error::Task {
				key: key.into(),
				source,
			})??;

		tracing::debug!(key, "saved persisted record");
		Ok(result)
	}
}

#[cfg(test)]
mod test {
	use serde::Deserialize;

	use super::*;

	#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
	struct Counter {
		count: u32,
	}

	#[test]
	fn test_restore_missing_is_default() {
		let storage = Arc::new(MemoryStorage::default());
		let counter = Persisted::<Counter>::restore("counter", storage);

		assert_eq!(counter.get(), Counter::default());
	}

	#[tokio::test]
	async fn test_update_saves_record() {
		let storage = Arc::new(MemoryStorage::default());
		let counter = Persisted::<Counter>::restore("counter", storage.clone());

		let count = counter
			.update(|c| {
				c.count += 2;
				c.count
			})
			.await
			.unwrap();

		assert_eq!(count, 2);
		assert_eq!(
			storage.load("counter").unwrap().as_deref(),
			Some(r#"{"count":2}"#)
		);

		let restored = Persisted::<Counter>::restore("counter", storage);

		assert_eq!(restored.get().count, 2);
	}

	#[test]
	fn test_restore_corrupt_is_default() {
		let storage = Arc::new(MemoryStorage::default());
		storage.save("counter", "{not json").unwrap();

		let counter = Persisted::<Counter>::restore("counter", storage);

		assert_eq!(counter.get(), Counter::default());
	}

	#[test]
	fn test_file_storage_round_trip() {
		let dir = tempfile::tempdir().unwrap();
		let storage = FileStorage::new(dir.path().join("nested"));

		assert_eq!(storage.load("theme-storage").unwrap(), None);

		storage.save("theme-storage", r#"{"mode":"dark"}"#).unwrap();

		assert_eq!(
			storage.load("theme-storage").unwrap().as_deref(),
			Some(r#"{"mode":"dark"}"#)
		);
		assert!(dir.path().join("nested/theme-storage.json").exists());
		assert!(!dir.path().join("nested/theme-storage.json.tmp").exists());
	}

	#[tokio::test]
	async fn test_failed_save_keeps_change() {
		let file = tempfile::NamedTempFile::new().unwrap();
		let storage = Arc::new(FileStorage::new(file.path()));
		let counter = Persisted::<Counter>::restore("counter", storage);

		let result = counter.update(|c| c.count += 1).await;

		assert!(matches!(result, Err(Error::Io { .. })));
		assert_eq!(counter.get().count, 1);
	}

	#[tokio::test]
	async fn test_concurrent_updates_save_last_state() {
		let storage = Arc::new(MemoryStorage::default());
		let counter = Arc::new(Persisted::<Counter>::restore("counter", storage.clone()));

		let tasks = (0..8)
			.map(|_| {
				let counter = Arc::clone(&counter);

				tokio::spawn(async move { counter.update(|c| c.count += 1).await })
			})
			.collect::<Vec<_>>();

		for task in tasks {
			task.await.unwrap().unwrap();
		}

		assert_eq!(
			storage.load("counter").unwrap().as_deref(),
			Some(r#"{"count":8}"#)
		);
	}
}
