use serde::Deserialize;

// ---------------------------------------------------------------------------
// ImageRecord – one element of the pictures endpoint response
// ---------------------------------------------------------------------------

/// A single bird photo as served by the pictures endpoint.
///
/// Every field may be absent (missing key or JSON `null`). Absence is kept as
/// `None` here; only the UI substitutes a display string for it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageRecord {
    #[serde(default)]
    pub category: Option<String>,
    /// Relative path under the image base URL.
    #[serde(default, rename = "path")]
    pub image_path: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

// ---------------------------------------------------------------------------
// ViewState – what the gallery currently shows
// ---------------------------------------------------------------------------

/// The fetch lifecycle as seen by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Success {
        items: Vec<ImageRecord>,
        /// Distinct categories of `items` in first-seen order.
        categories: Vec<Option<String>>,
    },
    Error {
        message: String,
    },
}

impl ViewState {
    /// Build a `Success` state, deriving the category list from `items`.
    pub fn success(items: Vec<ImageRecord>) -> Self {
        let categories = unique_categories(&items);
        ViewState::Success { items, categories }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }
}

/// Distinct `category` values in order of first appearance.
///
/// `None` is a value like any other: it appears at most once.
pub fn unique_categories(items: &[ImageRecord]) -> Vec<Option<String>> {
    let mut categories: Vec<Option<String>> = Vec::new();
    for item in items {
        if !categories.contains(&item.category) {
            categories.push(item.category.clone());
        }
    }
    categories
}
