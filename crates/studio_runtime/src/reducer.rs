//! Reducer actions, side-effect intents, and transition logic for the selection store.

use studio_host::WallpaperApplyRequest;

use crate::{
    catalog::Catalog,
    model::{ActiveWallpaper, AppSettings, DisplaySettings, StudioState},
};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Actions accepted by [`reduce_studio`] to mutate [`StudioState`].
pub enum StudioAction {
    /// Mark a wallpaper as the active selection.
    SetActiveWallpaper {
        /// Wallpaper to select. Stored even when it does not resolve in the catalog.
        wallpaper_id: String,
        /// Category recorded when `wallpaper_id` does not resolve.
        fallback_category: String,
    },
    /// Same as [`StudioAction::SetActiveWallpaper`], and also request the host apply it.
    SetActiveWallpaperAndApply {
        /// Wallpaper to select and apply.
        wallpaper_id: String,
        /// Category recorded when `wallpaper_id` does not resolve.
        fallback_category: String,
    },
    /// Drop the active selection.
    ClearActiveWallpaper,
    /// Add a wallpaper to favorites, or remove it when already present.
    ToggleFavorite {
        /// Wallpaper to toggle. Not validated against the catalog.
        wallpaper_id: String,
    },
    /// Replace the wallpaper display settings.
    SetDisplaySettings {
        /// New display settings.
        settings: DisplaySettings,
    },
    /// Replace the app-level settings.
    SetAppSettings {
        /// New app settings.
        settings: AppSettings,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_studio`] for the runtime to execute.
pub enum RuntimeEffect {
    /// The active selection changed.
    SelectionChanged,
    /// Favorite membership or order changed.
    FavoritesChanged,
    /// Display or app settings changed.
    SettingsChanged,
    /// Ask the host to apply a wallpaper image.
    ApplyWallpaper(WallpaperApplyRequest),
}

/// Applies a [`StudioAction`] to the studio state and collects resulting side effects.
///
/// Every action is accepted. Change effects are only emitted when the state actually differs
/// afterwards; [`RuntimeEffect::ApplyWallpaper`] is emitted whenever an apply was requested for a
/// wallpaper that resolves, even if it was already active.
pub fn reduce_studio(
    catalog: &Catalog,
    state: &mut StudioState,
    action: StudioAction,
) -> Vec<RuntimeEffect> {
    let mut effects = Vec::new();
    match action {
        StudioAction::SetActiveWallpaper {
            wallpaper_id,
            fallback_category,
        } => {
            select_wallpaper(catalog, state, wallpaper_id, fallback_category, &mut effects);
        }
        StudioAction::SetActiveWallpaperAndApply {
            wallpaper_id,
            fallback_category,
        } => {
            let image_ref = catalog
                .find_wallpaper_by_id(&wallpaper_id)
                .map(|wallpaper| wallpaper.image_ref.clone());
            select_wallpaper(catalog, state, wallpaper_id, fallback_category, &mut effects);
            if let Some(image_ref) = image_ref {
                effects.push(RuntimeEffect::ApplyWallpaper(WallpaperApplyRequest {
                    image_ref,
                    display_mode: state.display.display_mode,
                }));
            }
        }
        StudioAction::ClearActiveWallpaper => {
            if state.active.take().is_some() {
                effects.push(RuntimeEffect::SelectionChanged);
            }
        }
        StudioAction::ToggleFavorite { wallpaper_id } => {
            state.favorites.toggle(&wallpaper_id);
            effects.push(RuntimeEffect::FavoritesChanged);
        }
        StudioAction::SetDisplaySettings { settings } => {
            if state.display != settings {
                state.display = settings;
                effects.push(RuntimeEffect::SettingsChanged);
            }
        }
        StudioAction::SetAppSettings { settings } => {
            if state.app != settings {
                state.app = settings;
                effects.push(RuntimeEffect::SettingsChanged);
            }
        }
    }

    effects
}

fn select_wallpaper(
    catalog: &Catalog,
    state: &mut StudioState,
    wallpaper_id: String,
    fallback_category: String,
    effects: &mut Vec<RuntimeEffect>,
) {
    let category = catalog
        .find_wallpaper_by_id(&wallpaper_id)
        .map(|wallpaper| wallpaper.category.clone())
        .unwrap_or(fallback_category);
    let next = ActiveWallpaper {
        category,
        selection_id: wallpaper_id,
    };
    if state.active.as_ref() != Some(&next) {
        state.active = Some(next);
        effects.push(RuntimeEffect::SelectionChanged);
    }
}
