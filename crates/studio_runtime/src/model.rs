use serde::{Deserialize, Serialize};
use studio_host::WallpaperDisplayMode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    /// Authored card count. Not derived from the catalog's wallpaper list.
    pub count: u32,
    pub image_ref: String,
    pub color_tag: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallpaper {
    pub id: String,
    pub name: String,
    /// Owning [`Category::id`].
    pub category: String,
    pub image_ref: String,
    pub tags: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveWallpaper {
    pub category: String,
    pub selection_id: String,
}

/// Favorite wallpaper ids in the order they were added.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteSet(Vec<String>);

impl FavoriteSet {
    /// Builds a set from `ids`, keeping the first occurrence of each id.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for id in ids {
            let id = id.into();
            if !set.contains(&id) {
                set.0.push(id);
            }
        }
        set
    }

    pub fn contains(&self, wallpaper_id: &str) -> bool {
        self.0.iter().any(|id| id == wallpaper_id)
    }

    /// Removes `wallpaper_id` when present, otherwise appends it. Returns the new membership.
    ///
    /// A re-added id always lands at the end, not at its previous position.
    pub fn toggle(&mut self, wallpaper_id: &str) -> bool {
        if let Some(index) = self.0.iter().position(|id| id == wallpaper_id) {
            self.0.remove(index);
            false
        } else {
            self.0.push(wallpaper_id.to_string());
            true
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ImageQuality {
    #[default]
    High,
    Medium,
    Low,
}

impl ImageQuality {
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High (Best Quality)",
            Self::Medium => "Medium (Standard)",
            Self::Low => "Low (Fastest Load)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DisplaySettings {
    pub display_mode: WallpaperDisplayMode,
    pub auto_rotation: bool,
    pub lock_wallpaper: bool,
    pub sync_devices: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub image_quality: ImageQuality,
    pub notifications_enabled: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            image_quality: ImageQuality::High,
            notifications_enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StudioState {
    pub active: Option<ActiveWallpaper>,
    pub favorites: FavoriteSet,
    pub display: DisplaySettings,
    pub app: AppSettings,
}

impl StudioState {
    pub fn snapshot(&self, revision: u64) -> SelectionSnapshot {
        SelectionSnapshot {
            revision,
            active: self.active.clone(),
            favorites: self.favorites.clone(),
            display: self.display,
            app: self.app,
        }
    }
}

/// Immutable view of the store published to readers after each committed change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSnapshot {
    /// Starts at 0 and increases by one per committed change.
    pub revision: u64,
    pub active: Option<ActiveWallpaper>,
    pub favorites: FavoriteSet,
    pub display: DisplaySettings,
    pub app: AppSettings,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn favorite_set_from_ids_drops_duplicates_keeping_first_position() {
        let set = FavoriteSet::from_ids(["n2", "n1", "n2", "n3"]);
        assert_eq!(set.as_slice(), ["n2", "n1", "n3"]);
    }

    #[test]
    fn toggle_removes_in_place_and_appends_on_readd() {
        let mut set = FavoriteSet::from_ids(["n1", "n2", "n3"]);

        assert!(!set.toggle("n1"));
        assert_eq!(set.as_slice(), ["n2", "n3"]);

        // Re-adding goes to the end rather than back to the front.
        assert!(set.toggle("n1"));
        assert_eq!(set.as_slice(), ["n2", "n3", "n1"]);
    }

    #[test]
    fn snapshot_carries_state_and_revision() {
        let state = StudioState {
            active: Some(ActiveWallpaper {
                category: "nature".to_string(),
                selection_id: "n2".to_string(),
            }),
            favorites: FavoriteSet::from_ids(["n1"]),
            display: DisplaySettings {
                display_mode: WallpaperDisplayMode::Tile,
                auto_rotation: true,
                ..DisplaySettings::default()
            },
            app: AppSettings::default(),
        };

        let snapshot = state.snapshot(7);
        assert_eq!(snapshot.revision, 7);
        assert_eq!(snapshot.active, state.active);
        assert_eq!(snapshot.favorites, state.favorites);
        assert_eq!(snapshot.display, state.display);
        assert_eq!(snapshot.app, state.app);
    }

    #[test]
    fn settings_defaults_match_setup_screens() {
        let display = DisplaySettings::default();
        assert_eq!(display.display_mode, WallpaperDisplayMode::Fit);
        assert!(!display.auto_rotation && !display.lock_wallpaper && !display.sync_devices);

        let app = AppSettings::default();
        assert_eq!(app.image_quality, ImageQuality::High);
        assert!(app.notifications_enabled);
    }
}
