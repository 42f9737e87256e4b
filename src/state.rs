use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::color::ColorMap;
use crate::data::filter::{CategoryFilter, display_or_unknown, filtered_indices};
use crate::data::model::{ImageRecord, ViewState};

// ---------------------------------------------------------------------------
// Item identity for per-cell UI state
// ---------------------------------------------------------------------------

/// Stable key of a grid cell: the image path plus how many earlier records
/// share that path, or the list position for records without a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemKey {
    Path(String, usize),
    Position(usize),
}

/// One key per record, in list order.
pub fn item_keys(items: &[ImageRecord]) -> Vec<ItemKey> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    items
        .iter()
        .enumerate()
        .map(|(index, record)| match record.image_path.as_deref() {
            Some(path) => {
                let occurrence = seen.entry(path).or_default();
                let key = ItemKey::Path(path.to_string(), *occurrence);
                *occurrence += 1;
                key
            }
            None => ItemKey::Position(index),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Presentation state layered on top of the store snapshot.
pub struct AppState {
    /// Last snapshot taken from the store.
    pub snapshot: Arc<ViewState>,

    /// Selected category tab.
    pub filter: CategoryFilter,

    /// Indices into the Success items passing the filter (cached).
    pub visible_indices: Vec<usize>,

    /// Key of each Success item, aligned with the items.
    pub item_keys: Vec<ItemKey>,

    /// Whether each cell's caption overlay is revealed.
    pub overlays: HashMap<ItemKey, bool>,

    /// Tab colours for the current category list.
    pub color_map: Option<ColorMap>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            snapshot: Arc::new(ViewState::Loading),
            filter: CategoryFilter::default(),
            visible_indices: Vec::new(),
            item_keys: Vec::new(),
            overlays: HashMap::new(),
            color_map: None,
        }
    }
}

impl AppState {
    /// Adopt a new store snapshot. Returns `false` if it is the one already
    /// shown.
    pub fn sync(&mut self, snapshot: Arc<ViewState>) -> bool {
        if Arc::ptr_eq(&self.snapshot, &snapshot) {
            return false;
        }

        if let ViewState::Success { items, categories } = snapshot.as_ref() {
            self.item_keys = item_keys(items);
            self.rebuild_overlays();

            let selected_still_exists = categories
                .iter()
                .any(|c| display_or_unknown(c.as_deref()) == self.filter.selected());
            if self.filter.is_active() && !selected_still_exists {
                log::debug!("Category '{}' is gone; clearing filter", self.filter.selected());
                self.filter.clear();
            }

            self.color_map = Some(ColorMap::new(categories));
        } else {
            self.item_keys.clear();
        }

        self.snapshot = snapshot;
        self.refilter();
        true
    }

    /// Records of the current Success state, or nothing.
    pub fn items(&self) -> &[ImageRecord] {
        match self.snapshot.as_ref() {
            ViewState::Success { items, .. } => items,
            _ => &[],
        }
    }

    /// Recompute `visible_indices` after a filter or snapshot change.
    pub fn refilter(&mut self) {
        self.visible_indices = filtered_indices(self.items(), &self.filter);
    }

    /// Tab click.
    pub fn toggle_category(&mut self, category: Option<&str>) {
        self.filter.toggle(category);
        log::debug!("Category filter: '{}'", self.filter.selected());
        self.refilter();
    }

    /// Cell click: show or hide the caption overlay of item `index`.
    pub fn toggle_overlay(&mut self, index: usize) {
        let Some(key) = self.item_keys.get(index) else {
            return;
        };
        let revealed = self.overlays.entry(key.clone()).or_default();
        *revealed = !*revealed;
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.item_keys
            .get(index)
            .and_then(|key| self.overlays.get(key))
            .copied()
            .unwrap_or(false)
    }

    /// Reset overlay flags only when the set of item keys changes.
    fn rebuild_overlays(&mut self) {
        let keys: HashSet<&ItemKey> = self.item_keys.iter().collect();

        let unchanged =
            keys.len() == self.overlays.len() && keys.iter().all(|k| self.overlays.contains_key(k));
        if unchanged {
            return;
        }

        log::debug!("Item set changed; resetting {} overlays", keys.len());
        self.overlays = keys.into_iter().map(|k| (k.clone(), false)).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(category: Option<&str>, path: &str) -> ImageRecord {
        ImageRecord {
            category: category.map(str::to_string),
            image_path: Some(path.to_string()),
            author: None,
        }
    }

    fn birds() -> Arc<ViewState> {
        Arc::new(ViewState::success(vec![
            record(Some("Owl"), "owl.jpg"),
            record(Some("Hawk"), "hawk.jpg"),
            record(None, "mystery.jpg"),
        ]))
    }

    #[test]
    fn test_sync_same_snapshot_is_noop() {
        let mut state = AppState::default();
        let snapshot = birds();
        assert!(state.sync(Arc::clone(&snapshot)));
        assert!(!state.sync(snapshot));
    }

    #[test]
    fn test_sync_success_shows_everything() {
        let mut state = AppState::default();
        state.sync(birds());
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
        assert!(state.color_map.is_some());
    }

    #[test]
    fn test_toggle_category_filters_and_clears() {
        let mut state = AppState::default();
        state.sync(birds());

        state.toggle_category(Some("Owl"));
        assert_eq!(state.visible_indices, vec![0]);
        state.toggle_category(Some("Owl"));
        assert_eq!(state.visible_indices, vec![0, 1, 2]);

        state.toggle_category(None);
        assert_eq!(state.visible_indices, vec![2]);
    }

    #[test]
    fn test_overlay_survives_filtering() {
        let mut state = AppState::default();
        state.sync(birds());

        state.toggle_overlay(1);
        state.toggle_category(Some("Owl"));
        state.toggle_category(Some("Owl"));
        assert!(state.is_revealed(1));
        assert!(!state.is_revealed(0));
    }

    #[test]
    fn test_overlay_survives_refresh_with_same_items() {
        let mut state = AppState::default();
        state.sync(birds());
        state.toggle_overlay(0);

        state.sync(Arc::new(ViewState::Loading));
        state.sync(birds());
        assert!(state.is_revealed(0));
    }

    #[test]
    fn test_overlay_reset_when_items_change() {
        let mut state = AppState::default();
        state.sync(birds());
        state.toggle_overlay(0);

        state.sync(Arc::new(ViewState::success(vec![
            record(Some("Owl"), "owl.jpg"),
            record(Some("Duck"), "duck.jpg"),
        ])));
        assert!(!state.is_revealed(0));
    }

    #[test]
    fn test_filter_cleared_when_category_disappears() {
        let mut state = AppState::default();
        state.sync(birds());
        state.toggle_category(Some("Hawk"));

        state.sync(Arc::new(ViewState::success(vec![record(Some("Owl"), "owl.jpg")])));
        assert!(!state.filter.is_active());
        assert_eq!(state.visible_indices, vec![0]);
    }

    #[test]
    fn test_filter_kept_when_category_remains() {
        let mut state = AppState::default();
        state.sync(birds());
        state.toggle_category(Some("Hawk"));

        state.sync(birds());
        assert_eq!(state.filter.selected(), "Hawk");
        assert_eq!(state.visible_indices, vec![1]);
    }

    #[test]
    fn test_error_snapshot_has_no_items() {
        let mut state = AppState::default();
        state.sync(birds());
        state.sync(Arc::new(ViewState::Error {
            message: "down".to_string(),
        }));
        assert!(state.items().is_empty());
        assert!(state.visible_indices.is_empty());
        state.toggle_overlay(0);
        assert!(!state.is_revealed(0));
    }

    #[test]
    fn test_item_keys_number_duplicate_paths() {
        let pathless = ImageRecord {
            category: None,
            image_path: None,
            author: None,
        };
        let items = vec![
            record(Some("Owl"), "owl.jpg"),
            pathless,
            record(Some("Owl"), "owl.jpg"),
            record(Some("Hawk"), "hawk.jpg"),
        ];
        assert_eq!(
            item_keys(&items),
            vec![
                ItemKey::Path("owl.jpg".to_string(), 0),
                ItemKey::Position(1),
                ItemKey::Path("owl.jpg".to_string(), 1),
                ItemKey::Path("hawk.jpg".to_string(), 0),
            ]
        );
    }

    #[test]
    fn test_duplicate_paths_toggle_independently() {
        let mut state = AppState::default();
        state.sync(Arc::new(ViewState::success(vec![
            record(Some("Owl"), "owl.jpg"),
            record(Some("Owl"), "owl.jpg"),
        ])));

        state.toggle_overlay(1);
        assert!(state.is_revealed(1));
        assert!(!state.is_revealed(0));
    }
}
