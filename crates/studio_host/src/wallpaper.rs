//! Wallpaper apply service contracts and display-mode models.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
/// How the OS should lay a wallpaper image out on the screen.
pub enum WallpaperDisplayMode {
    /// Scale to fit without cropping.
    #[default]
    Fit,
    /// Scale to fill the entire screen, cropping as needed.
    Fill,
    /// Stretch to fill the screen, ignoring aspect ratio.
    Stretch,
    /// Repeat the image at intrinsic size to fill the screen.
    Tile,
}

impl WallpaperDisplayMode {
    /// Every display mode in the order the setup screen lists them.
    pub const ALL: [Self; 4] = [Self::Fit, Self::Fill, Self::Stretch, Self::Tile];

    /// Stable identifier used in configuration files.
    pub fn id(self) -> &'static str {
        match self {
            Self::Fit => "fit",
            Self::Fill => "fill",
            Self::Stretch => "stretch",
            Self::Tile => "tile",
        }
    }

    /// Parses a stable identifier, ignoring surrounding whitespace and ASCII case.
    pub fn from_id(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.id().eq_ignore_ascii_case(raw))
    }

    /// User-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Fit => "Fit",
            Self::Fill => "Fill",
            Self::Stretch => "Stretch",
            Self::Tile => "Tile",
        }
    }

    /// One-line description shown next to the label.
    pub fn description(self) -> &'static str {
        match self {
            Self::Fit => "Scale to fit without cropping",
            Self::Fill => "Scale to fill the entire screen",
            Self::Stretch => "Stretch to fill the screen",
            Self::Tile => "Repeat the image to fill the screen",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Request handed to the host when a wallpaper should become the device background.
pub struct WallpaperApplyRequest {
    /// Bundled image reference of the wallpaper to apply.
    pub image_ref: String,
    /// Layout the host should use.
    pub display_mode: WallpaperDisplayMode,
}

/// Object-safe boxed future used by [`WallpaperApplyService`] async methods.
pub type WallpaperApplyFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service that applies an image as the OS wallpaper.
pub trait WallpaperApplyService {
    /// Applies `request` as the device wallpaper.
    ///
    /// Failures are reported as human-readable messages; callers surface them to the user and
    /// must not roll back any selection they already recorded.
    fn apply_wallpaper<'a>(
        &'a self,
        request: &'a WallpaperApplyRequest,
    ) -> WallpaperApplyFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op wallpaper host adapter used by unsupported targets.
pub struct NoopWallpaperApplyService;

impl WallpaperApplyService for NoopWallpaperApplyService {
    fn apply_wallpaper<'a>(
        &'a self,
        _request: &'a WallpaperApplyRequest,
    ) -> WallpaperApplyFuture<'a, Result<(), String>> {
        Box::pin(async { Err("wallpaper apply service unavailable: apply_wallpaper".to_string()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory adapter that records every apply request and can be told to fail.
pub struct MemoryWallpaperApplyService {
    applied: Rc<RefCell<Vec<WallpaperApplyRequest>>>,
    failure: Rc<RefCell<Option<String>>>,
}

impl MemoryWallpaperApplyService {
    /// Makes every following apply call fail with `message`.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.borrow_mut() = Some(message.into());
    }

    /// Makes following apply calls succeed again.
    pub fn clear_failure(&self) {
        self.failure.borrow_mut().take();
    }

    /// Requests that were applied successfully, oldest first.
    pub fn applied(&self) -> Vec<WallpaperApplyRequest> {
        self.applied.borrow().clone()
    }

    /// Most recent successfully applied request.
    pub fn last_applied(&self) -> Option<WallpaperApplyRequest> {
        self.applied.borrow().last().cloned()
    }
}

impl WallpaperApplyService for MemoryWallpaperApplyService {
    fn apply_wallpaper<'a>(
        &'a self,
        request: &'a WallpaperApplyRequest,
    ) -> WallpaperApplyFuture<'a, Result<(), String>> {
        Box::pin(async move {
            if let Some(message) = self.failure.borrow().clone() {
                return Err(message);
            }
            self.applied.borrow_mut().push(request.clone());
            Ok(())
        })
    }
}
