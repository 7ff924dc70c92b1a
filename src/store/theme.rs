use std::sync::Arc;

use crate::{
	model::{PatchThemeInput, Theme, ThemeMode, ThemePreset},
	persist::{self, Persisted, Storage},
};

/// The storage key of the theme record.
pub const STORAGE_KEY: &str = "theme-storage";

/// Holds the UI theme preference and saves it on every change.
#[derive(Clone)]
pub struct ThemeStore {
	record: Arc<Persisted<Theme>>,
}

impl ThemeStore {
	pub fn restore(storage: Arc<dyn Storage>) -> Self {
		Self {
			record: Arc::new(Persisted::restore(STORAGE_KEY, storage)),
		}
	}

	pub fn current(&self) -> Theme {
		self.record.get()
	}

	/// Flips between light and dark mode.
	pub async fn toggle_mode(&self) -> Result<Theme, persist::Error> {
		self.record
			.update(|theme| {
				theme.mode = theme.mode.toggled();
				*theme
			})
			.await
	}

	pub async fn set_mode(&self, mode: ThemeMode) -> Result<Theme, persist::Error> {
		self.apply(PatchThemeInput {
			mode: Some(mode),
			preset: None,
		})
		.await
	}

	pub async fn set_preset(&self, preset: ThemePreset) -> Result<Theme, persist::Error> {
		self.apply(PatchThemeInput {
			mode: None,
			preset: Some(preset),
		})
		.await
	}

	/// Applies the fields present in `patch`, leaving the others untouched.
	pub async fn apply(&self, patch: PatchThemeInput) -> Result<Theme, persist::Error> {
		let theme = self
			.record
			.update(|theme| {
				if let Some(mode) = patch.mode {
					theme.mode = mode;
				}

				if let Some(preset) = patch.preset {
					theme.preset = preset;
				}

				*theme
			})
			.await?;

		tracing::debug!(?theme, "theme changed");
		Ok(theme)
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::persist::MemoryStorage;

	#[tokio::test]
	async fn test_toggle_mode() {
		let store = ThemeStore::restore(Arc::new(MemoryStorage::default()));

		assert_eq!(store.current().mode, ThemeMode::Light);
		assert_eq!(store.toggle_mode().await.unwrap().mode, ThemeMode::Dark);
		assert_eq!(store.toggle_mode().await.unwrap().mode, ThemeMode::Light);
	}

	#[tokio::test]
	async fn test_set_preset_keeps_mode() {
		let store = ThemeStore::restore(Arc::new(MemoryStorage::default()));

		store.set_mode(ThemeMode::Dark).await.unwrap();
		let theme = store.set_preset(ThemePreset::Matcha).await.unwrap();

		assert_eq!(
			theme,
			Theme {
				mode: ThemeMode::Dark,
				preset: ThemePreset::Matcha,
			}
		);
	}

	#[tokio::test]
	async fn test_theme_survives_restart() {
		let storage = Arc::new(MemoryStorage::default());
		let store = ThemeStore::restore(storage.clone());

		store.set_preset(ThemePreset::Sunset).await.unwrap();
		store.toggle_mode().await.unwrap();

		let restored = ThemeStore::restore(storage.clone());

		assert_eq!(restored.current(), store.current());
		assert_eq!(
			storage.load(STORAGE_KEY).unwrap().as_deref(),
			Some(r#"{"mode":"dark","preset":"sunset"}"#)
		);
	}
}
