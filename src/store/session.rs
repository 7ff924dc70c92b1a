use std::sync::Arc;

use uuid::Uuid;

use crate::{
	model::{SessionRecord, User},
	persist::{self, Persisted, Storage},
};

/// The storage key of the session record.
pub const STORAGE_KEY: &str = "auth-storage";

/// The id given to every mocked user.
pub const USER_ID: u64 = 1;

/// Holds the (mocked) authenticated session and saves it on every change.
#[derive(Clone)]
pub struct SessionStore {
	record: Arc<Persisted<SessionRecord>>,
}

impl SessionStore {
	/// Restores the last saved session, if any.
	pub fn restore(storage: Arc<dyn Storage>) -> Self {
		let record = Persisted::restore(STORAGE_KEY, storage);

		Self {
			record: Arc::new(record),
		}
	}

	async fn sign_in(&self, user: User) -> Result<SessionRecord, persist::Error> {
		let token = format!("mock-token-{}", Uuid::new_v4());

		self.record
			.update(|record| {
				*record = SessionRecord {
					user: Some(user),
					token: Some(token),
					is_authenticated: true,
				};

				record.clone()
			})
			.await
	}

	/// Signs in with any email address. Always succeeds.
	pub async fn login(&self, email: &str) -> Result<SessionRecord, persist::Error> {
		tracing::info!(email, "logging in");

		self.sign_in(User {
			id: USER_ID,
			name: "User".into(),
			email: email.into(),
		})
		.await
	}

	/// Creates an account and signs in with it. Always succeeds.
	pub async fn register(&self, email: &str, name: &str) -> Result<SessionRecord, persist::Error> {
		tracing::info!(email, name, "registering");

		self.sign_in(User {
			id: USER_ID,
			name: name.into(),
			email: email.into(),
		})
		.await
	}

	pub async fn logout(&self) -> Result<(), persist::Error> {
		tracing::info!("logging out");

		self.record
			.update(|record| *record = SessionRecord::default())
			.await
	}

	pub fn current(&self) -> SessionRecord {
		self.record.get()
	}

	/// Whether a user and token are present and the session is flagged as authenticated.
	pub fn is_signed_in(&self) -> bool {
		self.record.get().signed_in().is_some()
	}

	/// The signed-in user, if the session is complete.
	pub fn user(&self) -> Option<User> {
		self.record.get().signed_in().map(|(user, _)| user)
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::persist::{MemoryStorage, Storage};

	#[tokio::test]
	async fn test_login_and_logout() {
		let store = SessionStore::restore(Arc::new(MemoryStorage::default()));

		assert!(!store.is_signed_in());

		let record = store.login("ada@example.com").await.unwrap();
		let user = record.user.unwrap();

		assert!(record.is_authenticated);
		assert_eq!(user.email, "ada@example.com");
		assert_eq!(user.name, "User");
		assert!(record.token.unwrap().starts_with("mock-token-"));

		store.logout().await.unwrap();

		assert_eq!(store.current(), SessionRecord::default());
		assert_eq!(store.user(), None);
	}

	#[tokio::test]
	async fn test_register_uses_name() {
		let store = SessionStore::restore(Arc::new(MemoryStorage::default()));

		store.register("grace@example.com", "Grace").await.unwrap();

		assert_eq!(store.user().unwrap().name, "Grace");
	}

	#[tokio::test]
	async fn test_session_survives_restart() {
		let storage = Arc::new(MemoryStorage::default());
		let store = SessionStore::restore(storage.clone());
		let record = store.login("ada@example.com").await.unwrap();

		let restored = SessionStore::restore(storage.clone());

		assert_eq!(restored.current(), record);

		restored.logout().await.unwrap();

		assert!(!SessionStore::restore(storage).is_signed_in());
	}

	#[tokio::test]
	async fn test_tokens_differ_between_logins() {
		let store = SessionStore::restore(Arc::new(MemoryStorage::default()));

		let first = store.login("ada@example.com").await.unwrap().token;
		let second = store.login("ada@example.com").await.unwrap().token;

		assert_ne!(first, second);
	}

	#[tokio::test]
	async fn test_incomplete_record_is_signed_out() {
		let storage = Arc::new(MemoryStorage::default());
		storage
			.save(
				STORAGE_KEY,
				r#"{"user":null,"token":null,"isAuthenticated":true}"#,
			)
			.unwrap();

		let store = SessionStore::restore(storage);

		assert!(!store.is_signed_in());
		assert_eq!(store.user(), None);
	}
}
