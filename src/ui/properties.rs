// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Properties panel for styling, export and upload.

use crate::config::UploadConfig;
use crate::io::export::ExportFormat;
use crate::models::project::{LineStyle, Project, ProjectPatch};
use crate::ui::render::{format_color, parse_color};

/// Upload progress shown under the form.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum UploadStatus {
    #[default]
    Idle,
    Uploading,
    Success,
    Error(String),
}

/// Upload form fields. The credential is never entered here.
#[derive(Debug, Clone)]
pub struct UploadForm {
    pub repo: String,
    pub path: String,
    pub message: String,
    pub status: UploadStatus,
}

impl UploadForm {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            repo: String::new(),
            path: config.default_path.clone(),
            message: config.default_message.clone(),
            status: UploadStatus::Idle,
        }
    }
}

/// Panel state that outlives a frame.
#[derive(Debug, Clone)]
pub struct PropertiesState {
    pub upload: UploadForm,
    pub confirm_clear: bool,
}

impl PropertiesState {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            upload: UploadForm::new(config),
            confirm_clear: false,
        }
    }
}

/// Result of properties panel interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertiesAction {
    None,
    Update(ProjectPatch),
    ClearDots,
    Export(ExportFormat),
    Upload,
}

/// Display the properties panel for the active project.
pub fn show(ui: &mut egui::Ui, project: &Project, state: &mut PropertiesState) -> PropertiesAction {
    let mut action = PropertiesAction::None;

    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.heading("Style");
        ui.add_space(4.0);

        let mut show_lines = project.show_lines;
        if ui.checkbox(&mut show_lines, "Show lines").changed() {
            action = PropertiesAction::Update(ProjectPatch {
                show_lines: Some(show_lines),
                ..Default::default()
            });
        }

        let mut dot_size = project.dot_size;
        if ui
            .add(egui::Slider::new(&mut dot_size, 1.0..=30.0).text("Dot size"))
            .changed()
        {
            action = PropertiesAction::Update(ProjectPatch {
                dot_size: Some(dot_size),
                ..Default::default()
            });
        }

        let mut line_thickness = project.line_thickness;
        if ui
            .add(egui::Slider::new(&mut line_thickness, 0.5..=20.0).text("Line thickness"))
            .changed()
        {
            action = PropertiesAction::Update(ProjectPatch {
                line_thickness: Some(line_thickness),
                ..Default::default()
            });
        }

        ui.horizontal(|ui| {
            let mut dot_color = parse_color(&project.dot_color);
            if ui.color_edit_button_srgba(&mut dot_color).changed() {
                action = PropertiesAction::Update(ProjectPatch {
                    dot_color: Some(format_color(dot_color)),
                    ..Default::default()
                });
            }
            ui.label("Dot color");
        });

        ui.horizontal(|ui| {
            let mut line_color = parse_color(&project.line_color);
            if ui.color_edit_button_srgba(&mut line_color).changed() {
                action = PropertiesAction::Update(ProjectPatch {
                    line_color: Some(format_color(line_color)),
                    ..Default::default()
                });
            }
            ui.label("Line color");
        });

        let mut line_style = project.line_style;
        egui::ComboBox::from_label("Line style")
            .selected_text(format!("{:?}", line_style))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut line_style, LineStyle::Straight, "Straight");
                ui.selectable_value(&mut line_style, LineStyle::Curved, "Curved");
            });
        if line_style != project.line_style {
            action = PropertiesAction::Update(ProjectPatch {
                line_style: Some(line_style),
                ..Default::default()
            });
        }

        ui.add_space(8.0);
        if state.confirm_clear {
            ui.horizontal(|ui| {
                ui.label("Remove all dots?");
                if ui.button("Clear").clicked() {
                    action = PropertiesAction::ClearDots;
                    state.confirm_clear = false;
                }
                if ui.button("Cancel").clicked() {
                    state.confirm_clear = false;
                }
            });
        } else if ui
            .add_enabled(!project.dots.is_empty(), egui::Button::new("🗑 Clear canvas"))
            .clicked()
        {
            state.confirm_clear = true;
        }

        ui.separator();
        ui.heading("Export");
        ui.horizontal(|ui| {
            for format in [ExportFormat::Json, ExportFormat::Svg, ExportFormat::Png] {
                if ui.button(format.label()).clicked() {
                    action = PropertiesAction::Export(format);
                }
            }
        });

        ui.separator();
        ui.heading("Upload");
        let form = &mut state.upload;
        egui::Grid::new("upload_form").num_columns(2).show(ui, |ui| {
            ui.label("Repository");
            ui.add(egui::TextEdit::singleline(&mut form.repo).hint_text("owner/repo"));
            ui.end_row();
            ui.label("Path");
            ui.text_edit_singleline(&mut form.path);
            ui.end_row();
            ui.label("Message");
            ui.text_edit_singleline(&mut form.message);
            ui.end_row();
        });

        let uploading = form.status == UploadStatus::Uploading;
        let label = if uploading { "Uploading..." } else { "Upload" };
        if ui.add_enabled(!uploading, egui::Button::new(label)).clicked() {
            action = PropertiesAction::Upload;
        }

        match &form.status {
            UploadStatus::Idle | UploadStatus::Uploading => {}
            UploadStatus::Success => {
                ui.colored_label(egui::Color32::LIGHT_GREEN, "Uploaded successfully");
            }
            UploadStatus::Error(message) => {
                ui.colored_label(egui::Color32::LIGHT_RED, message);
            }
        }
    });

    action
}
