//! Typed host-domain contracts shared by the wallpaper studio runtime and platform adapters.
//!
//! This crate is the API-first boundary for the one OS capability the studio depends on: applying
//! an image as the device wallpaper. The runtime records selections itself and only reaches the
//! host through [`WallpaperApplyService`], so platform adapters can be swapped without touching
//! selection state.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod wallpaper;

pub use wallpaper::{
    MemoryWallpaperApplyService, NoopWallpaperApplyService, WallpaperApplyFuture,
    WallpaperApplyRequest, WallpaperApplyService, WallpaperDisplayMode,
};
