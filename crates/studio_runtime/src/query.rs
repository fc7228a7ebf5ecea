//! Read-only projections joining store snapshots with the catalog for rendering.
//!
//! Dangling ids never surface as errors here: a selection or favorite that no longer resolves is
//! left out of the projection.

use crate::{
    catalog::Catalog,
    model::{ActiveWallpaper, Category, SelectionSnapshot, Wallpaper},
    store::SelectionStore,
};

#[derive(Debug, Clone, PartialEq, Eq)]
/// The active wallpaper with its resolved category.
pub struct ActiveWallpaperDetails {
    pub category: Category,
    pub wallpaper: Wallpaper,
    pub selection: ActiveWallpaper,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Browse-card summary for one category.
pub struct CategoryOverview {
    pub category: Category,
    /// Wallpapers actually in the catalog for this category.
    pub wallpaper_count: usize,
    pub favorite_count: usize,
}

/// Resolves the active selection, or `None` when nothing is active or either side dangles.
pub fn active_wallpaper_details(
    catalog: &Catalog,
    snapshot: &SelectionSnapshot,
) -> Option<ActiveWallpaperDetails> {
    let selection = snapshot.active.as_ref()?;
    let category = catalog.find_category_by_id(&selection.category)?;
    let wallpaper = catalog.find_wallpaper_by_id(&selection.selection_id)?;
    Some(ActiveWallpaperDetails {
        category: category.clone(),
        wallpaper: wallpaper.clone(),
        selection: selection.clone(),
    })
}

/// Favorite wallpapers in catalog order. Unresolved favorite ids are dropped.
pub fn favorite_wallpapers(catalog: &Catalog, snapshot: &SelectionSnapshot) -> Vec<Wallpaper> {
    catalog
        .wallpapers_by_ids(snapshot.favorites.as_slice())
        .into_iter()
        .cloned()
        .collect()
}

pub fn category_overview(catalog: &Catalog, snapshot: &SelectionSnapshot) -> Vec<CategoryOverview> {
    catalog
        .list_categories()
        .iter()
        .map(|category| {
            let wallpapers = catalog.wallpapers_by_category(&category.id);
            let favorite_count = wallpapers
                .iter()
                .filter(|wallpaper| snapshot.favorites.contains(&wallpaper.id))
                .count();
            CategoryOverview {
                category: category.clone(),
                wallpaper_count: wallpapers.len(),
                favorite_count,
            }
        })
        .collect()
}

impl SelectionStore {
    /// [`active_wallpaper_details`] for the latest snapshot.
    pub fn active_wallpaper_details(&self) -> Option<ActiveWallpaperDetails> {
        active_wallpaper_details(self.catalog(), &self.snapshot())
    }

    /// [`favorite_wallpapers`] for the latest snapshot.
    pub fn favorite_wallpapers(&self) -> Vec<Wallpaper> {
        favorite_wallpapers(self.catalog(), &self.snapshot())
    }

    pub fn category_overview(&self) -> Vec<CategoryOverview> {
        category_overview(self.catalog(), &self.snapshot())
    }
}
