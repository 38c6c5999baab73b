// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editor header bar.
//!
//! Back navigation, the project name field and zoom controls.

use crate::util::geometry::Transform;

/// Result of toolbar interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolbarAction {
    None,
    Back,
    Rename(String),
}

/// Trimmed new name, if it is non-empty and differs from the current one.
pub fn committed_name(current: &str, edited: &str) -> Option<String> {
    let trimmed = edited.trim();
    (!trimmed.is_empty() && trimmed != current).then(|| trimmed.to_string())
}

/// Display the toolbar. `name_buffer` holds the in-progress name edit,
/// committed when the field loses focus.
pub fn show(
    ui: &mut egui::Ui,
    current_name: &str,
    name_buffer: &mut String,
    transform: &mut Transform,
) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        if ui.button("⬅ Projects").clicked() {
            action = ToolbarAction::Back;
        }

        ui.separator();

        let response = ui.add(
            egui::TextEdit::singleline(name_buffer)
                .hint_text("Untitled Project")
                .desired_width(240.0),
        );
        if response.lost_focus() {
            match committed_name(current_name, name_buffer) {
                Some(name) => action = ToolbarAction::Rename(name),
                None => *name_buffer = current_name.to_string(),
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("➕").on_hover_text("Zoom in").clicked() {
                transform.zoom_in();
            }
            if ui
                .button(format!("{}%", transform.zoom_percent()))
                .on_hover_text("Reset view")
                .clicked()
            {
                transform.reset();
            }
            if ui.button("➖").on_hover_text("Zoom out").clicked() {
                transform.zoom_out();
            }
        });
    });

    action
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_committed_name() {
        assert_eq!(committed_name("old", "  new  "), Some("new".to_string()));
        assert_eq!(committed_name("old", "old "), None);
        assert_eq!(committed_name("old", "   "), None);
    }
}
