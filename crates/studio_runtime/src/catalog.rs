//! Built-in wallpaper catalog and pure lookup helpers.
//!
//! Lookups never fail: a miss is `None` or an empty list. The built-in catalog is generated from
//! `catalog.toml` at build time and parsed once per process.

use std::{
    collections::HashSet,
    sync::{Arc, OnceLock},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Category, Wallpaper};

include!(concat!(env!("OUT_DIR"), "/wallpaper_catalog_generated.rs"));

/// Asset directory for wallpaper images.
pub const WALLPAPER_ASSET_DIR: &str = "wallpapers";
/// Asset directory for category card art.
pub const CATEGORY_ASSET_DIR: &str = "categories";

const CATALOG_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogDocument {
    schema_version: u32,
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    wallpapers: Vec<Wallpaper>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors raised while loading an ad-hoc catalog document.
pub enum CatalogError {
    /// The document is not valid TOML for the catalog schema.
    #[error("failed to parse catalog: {0}")]
    Parse(String),
    /// The document declares an unsupported schema version.
    #[error("catalog schema mismatch: expected 1 found {0}")]
    SchemaVersion(u32),
    /// Two categories share an id (compared ignoring ASCII case).
    #[error("duplicate category id `{0}`")]
    DuplicateCategory(String),
    /// Two wallpapers share an id.
    #[error("duplicate wallpaper id `{0}`")]
    DuplicateWallpaper(String),
    /// A wallpaper names a category that is not declared.
    #[error("wallpaper `{wallpaper_id}` references unknown category `{category}`")]
    UnknownCategory {
        /// Offending wallpaper.
        wallpaper_id: String,
        /// Category it references.
        category: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Category whose authored `count` disagrees with the wallpapers actually in the catalog.
pub struct CategoryCountMismatch {
    pub category_id: String,
    pub authored: u32,
    pub actual: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Immutable set of categories and wallpapers in authored order.
pub struct Catalog {
    categories: Vec<Category>,
    wallpapers: Vec<Wallpaper>,
}

impl Catalog {
    /// Builds a catalog from already-validated records.
    pub fn new(categories: Vec<Category>, wallpapers: Vec<Wallpaper>) -> Self {
        Self {
            categories,
            wallpapers,
        }
    }

    /// Returns the shared build-time catalog.
    pub fn builtin() -> Arc<Catalog> {
        static CATALOG: OnceLock<Arc<Catalog>> = OnceLock::new();
        CATALOG
            .get_or_init(|| {
                let document: CatalogDocument =
                    serde_json::from_str(BUILTIN_WALLPAPER_CATALOG_JSON)
                        .expect("generated built-in wallpaper catalog should parse");
                Arc::new(Self::new(document.categories, document.wallpapers))
            })
            .clone()
    }

    /// Parses and validates a catalog document in the same TOML shape as `catalog.toml`.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] when the document does not parse or breaks id/reference rules.
    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument =
            toml::from_str(raw).map_err(|err| CatalogError::Parse(err.to_string()))?;
        if document.schema_version != CATALOG_SCHEMA_VERSION {
            return Err(CatalogError::SchemaVersion(document.schema_version));
        }

        let mut folded_category_ids = HashSet::new();
        for category in &document.categories {
            if !folded_category_ids.insert(category.id.to_ascii_lowercase()) {
                return Err(CatalogError::DuplicateCategory(category.id.clone()));
            }
        }
        let category_ids: HashSet<&str> = document
            .categories
            .iter()
            .map(|category| category.id.as_str())
            .collect();
        let mut wallpaper_ids = HashSet::new();
        for wallpaper in &document.wallpapers {
            if !wallpaper_ids.insert(wallpaper.id.as_str()) {
                return Err(CatalogError::DuplicateWallpaper(wallpaper.id.clone()));
            }
            if !category_ids.contains(wallpaper.category.as_str()) {
                return Err(CatalogError::UnknownCategory {
                    wallpaper_id: wallpaper.id.clone(),
                    category: wallpaper.category.clone(),
                });
            }
        }

        Ok(Self::new(document.categories, document.wallpapers))
    }

    pub fn list_categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn list_wallpapers(&self) -> &[Wallpaper] {
        &self.wallpapers
    }

    pub fn find_wallpaper_by_id(&self, wallpaper_id: &str) -> Option<&Wallpaper> {
        self.wallpapers
            .iter()
            .find(|wallpaper| wallpaper.id == wallpaper_id)
    }

    pub fn find_category_by_id(&self, category_id: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|category| category.id == category_id)
    }

    /// Wallpapers whose category equals `category_id`, ignoring ASCII case.
    pub fn wallpapers_by_category(&self, category_id: &str) -> Vec<&Wallpaper> {
        self.wallpapers
            .iter()
            .filter(|wallpaper| wallpaper.category.eq_ignore_ascii_case(category_id))
            .collect()
    }

    /// Wallpapers whose id is in `ids`, in catalog order rather than `ids` order.
    ///
    /// Ids with no matching wallpaper are ignored.
    pub fn wallpapers_by_ids<S: AsRef<str>>(&self, ids: &[S]) -> Vec<&Wallpaper> {
        let wanted: HashSet<&str> = ids.iter().map(|id| id.as_ref()).collect();
        self.wallpapers
            .iter()
            .filter(|wallpaper| wanted.contains(wallpaper.id.as_str()))
            .collect()
    }

    /// Resolves a declared image reference to its bundled asset path.
    pub fn image_source(&self, image_ref: &str) -> Option<String> {
        if self
            .wallpapers
            .iter()
            .any(|wallpaper| wallpaper.image_ref == image_ref)
        {
            return Some(format!("{WALLPAPER_ASSET_DIR}/{image_ref}"));
        }
        self.categories
            .iter()
            .any(|category| category.image_ref == image_ref)
            .then(|| format!("{CATEGORY_ASSET_DIR}/{image_ref}"))
    }

    pub fn category_count_mismatches(&self) -> Vec<CategoryCountMismatch> {
        self.categories
            .iter()
            .filter_map(|category| {
                let actual = self.wallpapers_by_category(&category.id).len();
                (actual != category.count as usize).then(|| CategoryCountMismatch {
                    category_id: category.id.clone(),
                    authored: category.count,
                    actual,
                })
            })
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::model::{Category, Wallpaper};

    use super::Catalog;

    pub(crate) fn category(id: &str, count: u32) -> Category {
        Category {
            id: id.to_string(),
            title: id.to_string(),
            subtitle: String::new(),
            count,
            image_ref: format!("{id}.png"),
            color_tag: "#F8F8F8".to_string(),
        }
    }

    pub(crate) fn wallpaper(id: &str, category: &str) -> Wallpaper {
        Wallpaper {
            id: id.to_string(),
            name: id.to_uppercase(),
            category: category.to_string(),
            image_ref: format!("{id}.png"),
            tags: Vec::new(),
            description: String::new(),
        }
    }

    /// Two nature wallpapers and one space wallpaper.
    pub(crate) fn small_catalog() -> Catalog {
        Catalog::new(
            vec![category("nature", 2), category("space", 3)],
            vec![
                wallpaper("n1", "nature"),
                wallpaper("n2", "nature"),
                wallpaper("s1", "space"),
            ],
        )
    }
}
