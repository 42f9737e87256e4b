use super::model::ImageRecord;

/// Label shown for a missing category or author.
pub const UNKNOWN: &str = "Unknown";

/// Display form of an optional field.
pub fn display_or_unknown(value: Option<&str>) -> &str {
    value.unwrap_or(UNKNOWN)
}

// ---------------------------------------------------------------------------
// Category filter: which tab is selected
// ---------------------------------------------------------------------------

/// Currently selected category tab. An empty selection means "show all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    selected: String,
}

impl CategoryFilter {
    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn is_active(&self) -> bool {
        !self.selected.is_empty()
    }

    /// Whether the tab for `category` is the selected one.
    pub fn is_selected(&self, category: Option<&str>) -> bool {
        self.is_active() && self.selected == display_or_unknown(category)
    }

    /// Tab click: select the category, or clear the filter if it was already
    /// selected.
    pub fn toggle(&mut self, category: Option<&str>) {
        let label = display_or_unknown(category);
        if self.selected == label {
            self.selected.clear();
        } else {
            self.selected = label.to_string();
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Case-insensitive substring match against the display category.
    pub fn matches(&self, record: &ImageRecord) -> bool {
        if !self.is_active() {
            return true;
        }
        display_or_unknown(record.category.as_deref())
            .to_lowercase()
            .contains(&self.selected.to_lowercase())
    }
}

/// Return indices of records that pass the filter, in list order.
pub fn filtered_indices(items: &[ImageRecord], filter: &CategoryFilter) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, record)| filter.matches(record))
        .map(|(i, _)| i)
        .collect()
}
