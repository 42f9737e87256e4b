use std::sync::Arc;

use eframe::egui::{self, Button, Color32, RichText, Ui};

use crate::data::filter::display_or_unknown;
use crate::data::model::ViewState;
use crate::state::AppState;

const TAB_HEIGHT: f32 = 32.0;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top bar. Returns `true` when the user asked for a reload.
pub fn top_bar(ui: &mut Ui, state: &AppState) -> bool {
    let mut reload = false;

    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.strong("Birds");
        ui.separator();

        let loading = state.snapshot.is_loading();
        if ui.add_enabled(!loading, Button::new("Reload")).clicked() {
            reload = true;
        }

        ui.separator();

        match state.snapshot.as_ref() {
            ViewState::Loading => {
                ui.add(egui::Spinner::new());
            }
            ViewState::Success { items, .. } => {
                ui.label(format!(
                    "{} images, {} visible",
                    items.len(),
                    state.visible_indices.len()
                ));
            }
            ViewState::Error { .. } => {
                ui.label(RichText::new("Failed to load").color(Color32::RED));
            }
        }
    });

    reload
}

// ---------------------------------------------------------------------------
// Category tabs
// ---------------------------------------------------------------------------

/// Render one equal-width tab per category. Clicking a tab selects it;
/// clicking the selected tab clears the filter.
pub fn category_tabs(ui: &mut Ui, state: &mut AppState, spacing: f32) {
    let snapshot = Arc::clone(&state.snapshot);
    let ViewState::Success { categories, .. } = snapshot.as_ref() else {
        return;
    };
    if categories.is_empty() {
        return;
    }

    let mut clicked: Option<Option<&str>> = None;

    ui.horizontal(|ui: &mut Ui| {
        ui.spacing_mut().item_spacing.x = spacing;
        let n = categories.len() as f32;
        let width = ((ui.available_width() - spacing * (n - 1.0)) / n).max(1.0);

        for category in categories {
            let category = category.as_deref();
            let selected = state.filter.is_selected(category);

            let (fill, text_color) = if selected {
                (Color32::WHITE, Color32::BLACK)
            } else {
                let fill = state
                    .color_map
                    .as_ref()
                    .map(|cm| cm.color_for(category))
                    .unwrap_or(Color32::BLACK);
                (fill, Color32::WHITE)
            };

            let label = RichText::new(display_or_unknown(category)).color(text_color);
            if ui
                .add_sized([width, TAB_HEIGHT], Button::new(label).fill(fill))
                .clicked()
            {
                clicked = Some(category);
            }
        }
    });

    if let Some(category) = clicked {
        state.toggle_category(category);
    }
}
