use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CategoryEntry {
    id: String,
    title: String,
    subtitle: String,
    count: u32,
    image_ref: String,
    color_tag: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WallpaperEntry {
    id: String,
    name: String,
    category: String,
    image_ref: String,
    tags: Vec<String>,
    description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogManifest {
    schema_version: u32,
    categories: Vec<CategoryEntry>,
    wallpapers: Vec<WallpaperEntry>,
}

fn validate(manifest: &CatalogManifest, path: &str) {
    if manifest.schema_version != 1 {
        panic!(
            "catalog schema mismatch in {path}: expected 1 found {}",
            manifest.schema_version
        );
    }

    let mut category_ids = HashSet::new();
    for category in &manifest.categories {
        if !category_ids.insert(category.id.to_ascii_lowercase()) {
            panic!("duplicate category id `{}` in {path}", category.id);
        }
    }

    let categories: HashSet<&str> = manifest
        .categories
        .iter()
        .map(|category| category.id.as_str())
        .collect();
    let mut wallpaper_ids = HashSet::new();
    for wallpaper in &manifest.wallpapers {
        if !wallpaper_ids.insert(wallpaper.id.as_str()) {
            panic!("duplicate wallpaper id `{}` in {path}", wallpaper.id);
        }
        if !categories.contains(wallpaper.category.as_str()) {
            panic!(
                "wallpaper `{}` references unknown category `{}` in {path}",
                wallpaper.id, wallpaper.category
            );
        }
    }
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("catalog.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let manifest: CatalogManifest = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    validate(&manifest, &path.display().to_string());

    let json = serde_json::to_string_pretty(&manifest).expect("serialize wallpaper catalog");
    let generated = format!(
        "/// Build-time generated built-in wallpaper catalog JSON.\n\
pub const BUILTIN_WALLPAPER_CATALOG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("wallpaper_catalog_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
