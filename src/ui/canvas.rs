// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for placing, dragging and deleting dots.
//!
//! This module feeds raw pointer events into the interaction state machine,
//! applies pan and wheel zoom to the view transform, and paints the scene.
//! Project edits are returned to the caller as [`CanvasAction`]s.

use crate::models::project::Project;
use crate::ui::interaction::{CanvasAction, DragState, Interaction};
use crate::ui::render::{build_scene, paint};
use crate::util::geometry::Transform;

const STATUS_BAR_HEIGHT: f32 = 24.0;

/// Display the canvas and handle pointer interaction for one frame.
pub fn show(
    ui: &mut egui::Ui,
    project: &Project,
    transform: &mut Transform,
    interaction: &mut Interaction,
) -> Vec<CanvasAction> {
    let mut actions = Vec::new();

    let size = (ui.available_size() - egui::vec2(0.0, STATUS_BAR_HEIGHT)).max(egui::Vec2::ZERO);
    let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());
    let rect = response.rect;
    let origin = rect.min;

    // Only events the canvas layer receives count; popups and menus drawn
    // above it keep their clicks.
    let over_canvas =
        |pos: egui::Pos2| rect.contains(pos) && ui.ctx().layer_id_at(pos) == Some(ui.layer_id());

    let events = ui.input(|i| i.events.clone());
    for event in events {
        let action = match event {
            egui::Event::PointerButton {
                pos,
                button,
                pressed: true,
                ..
            } if over_canvas(pos) => {
                interaction.pointer_down(button, pos, origin, transform, &project.dots)
            }
            egui::Event::PointerButton {
                pos,
                button,
                pressed: false,
                ..
            } => {
                if over_canvas(pos) {
                    interaction.pointer_up(button, pos, origin, transform)
                } else {
                    interaction.pointer_leave();
                    None
                }
            }
            egui::Event::PointerMoved(pos) => {
                if over_canvas(pos) {
                    interaction.pointer_move(pos, origin, transform)
                } else {
                    interaction.pointer_leave();
                    None
                }
            }
            egui::Event::PointerGone => {
                interaction.pointer_leave();
                None
            }
            _ => None,
        };

        match action {
            Some(CanvasAction::Pan(delta)) => transform.pan_by(delta),
            Some(action) => actions.push(action),
            None => {}
        }
    }

    if response.hovered() {
        let scroll = ui.input(|i| i.raw_scroll_delta.y);
        if scroll > 0.0 {
            transform.zoom_in();
        } else if scroll < 0.0 {
            transform.zoom_out();
        }
    }

    paint(&painter, rect, &build_scene(project, transform));

    ui.horizontal(|ui| {
        ui.label(format!("{} dots", project.dots.len()));
        ui.separator();
        ui.label(format!("Zoom: {}%", transform.zoom_percent()));
        ui.separator();
        let mode = match interaction.state() {
            DragState::Idle => "Click to add a dot, drag to pan, right-click a dot to delete".to_string(),
            DragState::DraggingDot(index) => format!("Moving dot {}", index + 1),
            DragState::Panning => "Panning".to_string(),
        };
        ui.label(egui::RichText::new(mode).italics().weak());
    });

    actions
}
