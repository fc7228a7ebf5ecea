//! "Save and set" flow: record the selection, then ask the host to apply it.

use log::{debug, warn};
use studio_host::{WallpaperApplyRequest, WallpaperApplyService};
use thiserror::Error;

use crate::{
    model::ActiveWallpaper,
    reducer::{RuntimeEffect, StudioAction},
    store::SelectionStore,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Apply failures surfaced to the user. The recorded selection is kept regardless.
pub enum ApplyError {
    /// The host refused or failed to apply the wallpaper.
    #[error("failed to apply wallpaper `{image_ref}`: {message}")]
    Host {
        /// Image the host was asked to apply.
        image_ref: String,
        /// Host-provided failure text.
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outcome of a successful [`apply_selection`] call.
pub struct ApplyReport {
    /// Selection recorded in the store.
    pub selection: ActiveWallpaper,
    /// Request the host applied, or `None` when the wallpaper did not resolve.
    pub applied: Option<WallpaperApplyRequest>,
}

/// Records `wallpaper_id` as active and applies it through `service`.
///
/// The selection is committed before the host is called and stays committed when the host fails.
/// Wallpapers that do not resolve in the catalog are recorded but not sent to the host.
///
/// # Errors
///
/// Returns [`ApplyError::Host`] when the host apply call fails.
pub async fn apply_selection<S: WallpaperApplyService + ?Sized>(
    store: &SelectionStore,
    service: &S,
    wallpaper_id: &str,
    fallback_category: &str,
) -> Result<ApplyReport, ApplyError> {
    let (effects, committed) = store.dispatch_and_read(
        StudioAction::SetActiveWallpaperAndApply {
            wallpaper_id: wallpaper_id.to_string(),
            fallback_category: fallback_category.to_string(),
        },
        |state| state.active.clone(),
    );
    // The reducer always records a selection for this action.
    let selection = committed.unwrap_or_else(|| ActiveWallpaper {
        category: fallback_category.to_string(),
        selection_id: wallpaper_id.to_string(),
    });

    let mut applied = None;
    for effect in effects {
        if let RuntimeEffect::ApplyWallpaper(request) = effect {
            if let Err(message) = service.apply_wallpaper(&request).await {
                warn!("wallpaper apply failed for {}: {message}", request.image_ref);
                return Err(ApplyError::Host {
                    image_ref: request.image_ref,
                    message,
                });
            }
            debug!(
                "applied wallpaper {} ({})",
                request.image_ref,
                request.display_mode.id()
            );
            applied = Some(request);
        }
    }

    Ok(ApplyReport { selection, applied })
}
