// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project list view.

use crate::models::project::Project;

#[derive(Debug, Clone, PartialEq)]
pub enum HomeAction {
    None,
    CreateNew,
    Open(String),
    Delete(String),
    Import,
}

/// `2025-03-01 14:05` in local time, or empty for invalid stamps.
fn format_timestamp(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|t| {
            t.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_default()
}

/// Display the project list. `pending_delete` holds the id awaiting
/// confirmation.
pub fn show(
    ui: &mut egui::Ui,
    projects: &[&Project],
    pending_delete: &mut Option<String>,
) -> HomeAction {
    let mut action = HomeAction::None;

    ui.horizontal(|ui| {
        ui.heading("My Projects");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("➕ Create New").clicked() {
                action = HomeAction::CreateNew;
            }
            if ui.button("Import JSON...").clicked() {
                action = HomeAction::Import;
            }
        });
    });
    ui.separator();

    if projects.is_empty() {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.label(
                egui::RichText::new("No projects yet")
                    .size(18.0)
                    .color(egui::Color32::from_gray(180)),
            );
            ui.add_space(10.0);
            if ui.button("Start Creating").clicked() {
                action = HomeAction::CreateNew;
            }
        });
        return action;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for project in projects {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.strong(&project.name);
                        ui.label(format!("{} dots", project.dots.len()));
                        ui.label(
                            egui::RichText::new(format_timestamp(project.last_modified)).weak(),
                        );
                    });

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if pending_delete.as_deref() == Some(project.id.as_str()) {
                            if ui.button("Cancel").clicked() {
                                *pending_delete = None;
                            }
                            if ui.button("Delete").clicked() {
                                action = HomeAction::Delete(project.id.clone());
                                *pending_delete = None;
                            }
                            ui.label(format!("Delete \"{}\"?", project.name));
                        } else {
                            if ui.button("🗑").on_hover_text("Delete").clicked() {
                                *pending_delete = Some(project.id.clone());
                            }
                            if ui.button("✏ Open").clicked() {
                                action = HomeAction::Open(project.id.clone());
                            }
                        }
                    });
                });
            });
            ui.add_space(4.0);
        }
    });

    action
}
