//! Wallpaper studio core: built-in catalog, shared selection store, and render projections.

pub mod catalog;
pub mod config;
pub mod context;
pub mod model;
pub mod query;
pub mod reducer;
pub mod setup;
pub mod store;

pub use catalog::{Catalog, CatalogError, CategoryCountMismatch};
pub use config::{ConfigError, StudioConfig};
pub use context::{
    provide_selection_store, take_selection_store, try_selection_store, use_selection_store,
    StoreError,
};
pub use model::*;
pub use query::{
    active_wallpaper_details, category_overview, favorite_wallpapers, ActiveWallpaperDetails,
    CategoryOverview,
};
pub use reducer::{reduce_studio, RuntimeEffect, StudioAction};
pub use setup::{apply_selection, ApplyError, ApplyReport};
pub use store::{SelectionStore, Subscription, SubscriptionId};
pub use studio_host::{WallpaperApplyRequest, WallpaperApplyService, WallpaperDisplayMode};
