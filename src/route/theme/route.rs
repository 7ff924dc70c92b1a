use axum::extract::State;
use macros::route;

use crate::{
	extract::Json,
	model::{PatchThemeInput, Theme},
	openapi::tag,
	store::ThemeStore,
};

use super::RouteError;

/// Get theme
/// Returns the current mode and color preset.
#[route(tag = tag::THEME)]
pub async fn get_theme(State(theme): State<ThemeStore>) -> Json<Theme> {
	Json(theme.current())
}

/// Update theme
/// Sets the mode, the color preset, or both. Omitted fields are left as they are.
#[route(tag = tag::THEME)]
pub async fn update_theme(
	State(theme): State<ThemeStore>,
	Json(patch): Json<PatchThemeInput>,
) -> Result<Json<Theme>, RouteError> {
	Ok(Json(theme.apply(patch).await?))
}

/// Toggle mode
/// Switches between light and dark mode.
#[route(tag = tag::THEME)]
pub async fn toggle_mode(State(theme): State<ThemeStore>) -> Result<Json<Theme>, RouteError> {
	Ok(Json(theme.toggle_mode().await?))
}
