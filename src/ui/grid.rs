use std::sync::Arc;

use eframe::egui::epaint::Mesh;
use eframe::egui::{
    self, Align2, Color32, FontId, Painter, Rect, ScrollArea, Sense, Shape, Ui, Vec2, pos2, vec2,
};

use crate::config::Config;
use crate::data::filter::display_or_unknown;
use crate::data::model::{ImageRecord, ViewState};
use crate::state::AppState;
use crate::ui::panels;

const CAPTION_PADDING: f32 = 8.0;
const CAPTION_SIZE: f32 = 12.0;

// ---------------------------------------------------------------------------
// Gallery (central panel)
// ---------------------------------------------------------------------------

/// Render the central panel for the current snapshot. Returns `true` when the
/// user asked to retry after an error.
pub fn gallery(ui: &mut Ui, state: &mut AppState, config: &Config) -> bool {
    let snapshot = Arc::clone(&state.snapshot);
    match snapshot.as_ref() {
        ViewState::Loading => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label("Loading..");
            });
            false
        }
        ViewState::Error { message } => error_view(ui, message),
        ViewState::Success { items, .. } => {
            ui.add_space(8.0);
            panels::category_tabs(ui, state, config.spacing);
            ui.add_space(8.0);

            if items.is_empty() {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.label("No pictures.");
                });
            } else {
                image_grid(ui, state, config);
            }
            false
        }
    }
}

fn error_view(ui: &mut Ui, message: &str) -> bool {
    let mut retry = false;
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space((ui.available_height() / 2.0 - 30.0).max(0.0));
        ui.label(message);
        ui.add_space(8.0);
        retry = ui.button("Retry").clicked();
    });
    retry
}

// ---------------------------------------------------------------------------
// Image grid
// ---------------------------------------------------------------------------

/// Number of columns and cell edge length for an adaptive grid: as many
/// columns as fit at `min_cell` width, stretched to fill the row.
pub fn grid_layout(available: f32, min_cell: f32, spacing: f32) -> (usize, f32) {
    let columns = (((available + spacing) / (min_cell + spacing)).floor() as usize).max(1);
    let cell = (available - spacing * (columns - 1) as f32) / columns as f32;
    (columns, cell.max(1.0))
}

fn image_grid(ui: &mut Ui, state: &mut AppState, config: &Config) {
    let mut clicked = None;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.spacing_mut().item_spacing = Vec2::splat(config.spacing);
            let (columns, cell) =
                grid_layout(ui.available_width(), config.min_cell_width, config.spacing);

            let items = state.items();
            for row in state.visible_indices.chunks(columns) {
                ui.horizontal(|ui: &mut Ui| {
                    for &idx in row {
                        let record = &items[idx];
                        if image_cell(ui, record, cell, state.is_revealed(idx), config) {
                            clicked = Some(idx);
                        }
                    }
                });
            }
        });

    if let Some(idx) = clicked {
        state.toggle_overlay(idx);
    }
}

/// One square cell. Returns `true` if it was clicked.
fn image_cell(ui: &mut Ui, record: &ImageRecord, size: f32, revealed: bool, config: &Config) -> bool {
    let (rect, response) = ui.allocate_exact_size(Vec2::splat(size), Sense::click());

    if ui.is_rect_visible(rect) {
        match &record.image_path {
            Some(path) => {
                egui::Image::new(config.image_url(path))
                    .show_loading_spinner(true)
                    .paint_at(ui, rect);
            }
            None => {
                ui.painter().rect_filled(rect, 0.0, Color32::DARK_GRAY);
            }
        }
        if revealed {
            paint_caption(ui.painter(), rect, record);
        }
    }

    let category = display_or_unknown(record.category.as_deref());
    let author = display_or_unknown(record.author.as_deref());
    response
        .on_hover_text(format!("{category} by {author}"))
        .clicked()
}

/// Black → transparent → black gradient with the category top-right and the
/// author bottom-left.
fn paint_caption(painter: &Painter, rect: Rect, record: &ImageRecord) {
    let mut mesh = Mesh::default();
    let mid_y = rect.center().y;
    mesh.colored_vertex(rect.left_top(), Color32::BLACK);
    mesh.colored_vertex(rect.right_top(), Color32::BLACK);
    mesh.colored_vertex(pos2(rect.left(), mid_y), Color32::TRANSPARENT);
    mesh.colored_vertex(pos2(rect.right(), mid_y), Color32::TRANSPARENT);
    mesh.colored_vertex(rect.left_bottom(), Color32::BLACK);
    mesh.colored_vertex(rect.right_bottom(), Color32::BLACK);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(1, 3, 2);
    mesh.add_triangle(2, 3, 4);
    mesh.add_triangle(3, 5, 4);
    painter.add(Shape::mesh(mesh));

    painter.text(
        rect.right_top() + vec2(-CAPTION_PADDING, CAPTION_PADDING),
        Align2::RIGHT_TOP,
        display_or_unknown(record.category.as_deref()),
        FontId::proportional(CAPTION_SIZE),
        Color32::WHITE,
    );
    painter.text(
        rect.left_bottom() + vec2(CAPTION_PADDING, -CAPTION_PADDING),
        Align2::LEFT_BOTTOM,
        format!("by {}", display_or_unknown(record.author.as_deref())),
        FontId::proportional(CAPTION_SIZE),
        Color32::WHITE,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_layout_fits_two_columns() {
        let (columns, cell) = grid_layout(370.0, 180.0, 5.0);
        assert_eq!(columns, 2);
        assert!((cell - 182.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_grid_layout_narrow_still_one_column() {
        let (columns, cell) = grid_layout(100.0, 180.0, 5.0);
        assert_eq!(columns, 1);
        assert!((cell - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_grid_layout_exact_fit() {
        // 3 * 180 + 2 * 5
        let (columns, cell) = grid_layout(550.0, 180.0, 5.0);
        assert_eq!(columns, 3);
        assert!((cell - 180.0).abs() < 1e-3);
    }
}
