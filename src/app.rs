// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait. It routes between the project list, the editor and
//! the help page, applies canvas and panel actions to the active project,
//! and polls background PNG exports and uploads.

use crate::config::Config;
use crate::io::export::{self, ExportFormat, ExportOptions};
use crate::io::serialization;
use crate::io::storage::{FileStore, ProjectStore};
use crate::io::upload::{self, UploadError};
use crate::models::project::{Project, ProjectPatch};
use crate::state::ProjectState;
use crate::ui::interaction::{CanvasAction, Interaction};
use crate::ui::properties::{PropertiesAction, PropertiesState, UploadStatus};
use crate::ui::toolbar::ToolbarAction;
use crate::ui::{about, canvas, home, properties, toolbar};
use crate::util::geometry::Transform;
use anyhow::Result;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, TryRecvError};

/// Routed views.
#[derive(Debug, Clone, PartialEq, Eq)]
enum View {
    Home,
    Editor(String),
    About,
}

/// Per-project editing session. Transform and pointer state are not saved.
struct EditorSession {
    project_id: String,
    transform: Transform,
    interaction: Interaction,
    name_buffer: String,
    properties: PropertiesState,
}

impl EditorSession {
    fn new(project: &Project, config: &Config) -> Self {
        Self {
            project_id: project.id.clone(),
            transform: Transform::default(),
            interaction: Interaction::new(),
            name_buffer: project.name.clone(),
            properties: PropertiesState::new(&config.upload),
        }
    }
}

/// PNG rasterization in flight and where to write it.
struct PendingPng {
    path: PathBuf,
    receiver: Receiver<Result<Vec<u8>>>,
}

/// Main application state.
pub struct DotsApp {
    config: Config,
    state: ProjectState<FileStore>,
    view: View,
    session: Option<EditorSession>,
    /// Project id awaiting delete confirmation on the home view
    pending_delete: Option<String>,
    png_export: Option<PendingPng>,
    upload: Option<Receiver<Result<(), UploadError>>>,
    status_message: Option<String>,
    needs_redraw: bool,
}

impl DotsApp {
    /// Open project storage and build the application.
    pub fn new(config: Config) -> Result<Self> {
        let store = FileStore::open(config.storage_dir())?;
        log::info!("Project storage: {}", store.dir().display());
        Ok(Self {
            state: ProjectState::new(ProjectStore::new(store)),
            config,
            view: View::Home,
            session: None,
            pending_delete: None,
            png_export: None,
            upload: None,
            status_message: None,
            needs_redraw: false,
        })
    }

    fn open_editor(&mut self, id: String) {
        self.view = View::Editor(id);
    }

    fn create_project(&mut self) {
        let id = self.state.create_new_project();
        self.open_editor(id);
    }

    fn import_project(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Project", &["json"])
            .pick_file()
        else {
            return;
        };

        match serialization::import_json(&path) {
            Ok(project) => match self.state.import_project(project) {
                Some(id) => {
                    self.status_message = Some(format!("Imported {}", path.display()));
                    self.open_editor(id);
                }
                None => {
                    self.status_message = Some(format!("Import failed: could not save {}", path.display()));
                }
            },
            Err(e) => {
                log::error!("Failed to import project: {:#}", e);
                self.status_message = Some(format!("Import failed: {}", e));
            }
        }
    }

    /// Apply a patch to the active project and schedule a redraw.
    fn update_active(&mut self, patch: ProjectPatch) {
        if self.state.update_active(patch) {
            self.needs_redraw = true;
        }
    }

    fn apply_canvas_actions(&mut self, actions: Vec<CanvasAction>) {
        if self.state.apply_canvas_actions(actions) {
            self.needs_redraw = true;
        }
    }

    fn export(&mut self, project: &Project, format: ExportFormat) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter(format.label(), &[format.extension()])
            .set_file_name(export::file_name(project, format))
            .save_file()
        else {
            return;
        };

        let result = match format {
            ExportFormat::Json => serialization::export_json(project, &path),
            ExportFormat::Svg => {
                let svg = export::to_svg_string(project, &ExportOptions::from_project(project));
                export::write_export(&path, svg.as_bytes())
            }
            ExportFormat::Png => {
                let receiver =
                    export::spawn_png_export(project.clone(), ExportOptions::from_project(project));
                self.png_export = Some(PendingPng { path, receiver });
                self.status_message = Some("Rendering PNG...".to_string());
                return;
            }
        };

        match result {
            Ok(()) => {
                log::info!("Exported {} ({}) to {}", format.label(), format.mime_type(), path.display());
                self.status_message = Some(format!("Exported {}", path.display()));
            }
            Err(e) => {
                log::error!("Failed to export {}: {:#}", format.label(), e);
                self.status_message = Some(format!("Export failed: {}", e));
            }
        }
    }

    fn start_upload(&mut self, project: &Project) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let form = &mut session.properties.upload;
        match upload::prepare_request(project, &form.repo, &form.path, &form.message) {
            Ok(request) => {
                log::info!("Uploading {} to {}", request.path, request.repo);
                self.upload = Some(upload::spawn_upload(
                    self.config.upload.endpoint.clone(),
                    self.config.upload.token(),
                    request,
                ));
                form.status = UploadStatus::Uploading;
            }
            Err(e) => form.status = UploadStatus::Error(e.to_string()),
        }
    }

    /// Collect results of background work.
    fn poll_background(&mut self) {
        if let Some(pending) = &self.png_export {
            match pending.receiver.try_recv() {
                Ok(result) => {
                    let path = pending.path.clone();
                    self.png_export = None;
                    match result.and_then(|bytes| export::write_export(&path, &bytes)) {
                        Ok(()) => {
                            log::info!(
                                "Exported PNG ({}) to {}",
                                ExportFormat::Png.mime_type(),
                                path.display()
                            );
                            self.status_message = Some(format!("Exported {}", path.display()));
                        }
                        Err(e) => {
                            log::error!("Failed to export PNG: {:#}", e);
                            self.status_message = Some(format!("PNG export failed: {}", e));
                        }
                    }
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => self.png_export = None,
            }
        }

        if let Some(receiver) = &self.upload {
            let result = match receiver.try_recv() {
                Ok(result) => result,
                Err(TryRecvError::Empty) => return,
                Err(TryRecvError::Disconnected) => {
                    Err(UploadError::Network("upload worker stopped".to_string()))
                }
            };
            self.upload = None;

            let status = match result {
                Ok(()) => {
                    log::info!("Upload finished");
                    UploadStatus::Success
                }
                Err(e) => {
                    log::error!("Upload failed: {}", e);
                    UploadStatus::Error(e.to_string())
                }
            };
            if let Some(session) = self.session.as_mut() {
                session.properties.upload.status = status;
            }
        }
    }

    fn show_home(&mut self, ctx: &egui::Context) {
        let action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                let projects = self.state.sorted_projects();
                home::show(ui, &projects, &mut self.pending_delete)
            })
            .inner;

        match action {
            home::HomeAction::CreateNew => self.create_project(),
            home::HomeAction::Open(id) => self.open_editor(id),
            home::HomeAction::Delete(id) => self.state.delete_project(&id),
            home::HomeAction::Import => self.import_project(),
            home::HomeAction::None => {}
        }
    }

    fn show_editor(&mut self, ctx: &egui::Context, id: &str) {
        if self.state.active().map(|p| p.id.as_str()) != Some(id) {
            self.state.load_project(id);
        }
        let Some(project) = self.state.active().cloned() else {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.label("Project not found");
                    if ui.button("Back to projects").clicked() {
                        self.view = View::Home;
                    }
                });
            });
            return;
        };

        if self.session.as_ref().map(|s| s.project_id.as_str()) != Some(id) {
            self.session = Some(EditorSession::new(&project, &self.config));
        }
        let Some(mut session) = self.session.take() else {
            return;
        };

        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                toolbar::show(ui, &project.name, &mut session.name_buffer, &mut session.transform)
            })
            .inner;

        let properties_action = egui::SidePanel::right("properties")
            .default_width(260.0)
            .show(ctx, |ui| properties::show(ui, &project, &mut session.properties))
            .inner;

        let before = session.transform;
        let canvas_actions = egui::CentralPanel::default()
            .show(ctx, |ui| {
                canvas::show(ui, &project, &mut session.transform, &mut session.interaction)
            })
            .inner;
        if session.transform != before {
            self.needs_redraw = true;
        }

        self.session = Some(session);
        self.apply_canvas_actions(canvas_actions);

        match toolbar_action {
            ToolbarAction::Back => {
                self.view = View::Home;
                self.session = None;
            }
            ToolbarAction::Rename(name) => self.update_active(ProjectPatch {
                name: Some(name),
                ..Default::default()
            }),
            ToolbarAction::None => {}
        }

        match properties_action {
            PropertiesAction::Update(patch) => self.update_active(patch),
            PropertiesAction::ClearDots => {
                let mut working = project.clone();
                working.clear_dots();
                self.update_active(ProjectPatch::dots(working.dots));
            }
            PropertiesAction::Export(format) => self.export(&project, format),
            PropertiesAction::Upload => {
                // Export from the latest state, including this frame's edits.
                let latest = self.state.active().cloned().unwrap_or(project);
                self.start_upload(&latest);
            }
            PropertiesAction::None => {}
        }
    }
}

impl eframe::App for DotsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_background();

        // Keep polling while background work is pending
        if self.png_export.is_some() || self.upload.is_some() {
            ctx.request_repaint();
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("New Project").clicked() {
                        self.create_project();
                        ui.close_menu();
                    }
                    if ui.button("Import Project...").clicked() {
                        self.import_project();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("View", |ui| {
                    if ui.button("Projects").clicked() {
                        self.view = View::Home;
                        self.session = None;
                        ui.close_menu();
                    }
                    if ui.button("About").clicked() {
                        self.view = View::About;
                        ui.close_menu();
                    }
                });

                if let Some(message) = &self.status_message {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(egui::RichText::new(message).weak());
                    });
                }
            });
        });

        match self.view.clone() {
            View::Home => self.show_home(ctx),
            View::Editor(id) => self.show_editor(ctx, &id),
            View::About => {
                egui::CentralPanel::default().show(ctx, about::show);
            }
        }

        // Render on mutation: one repaint per frame with changes.
        if std::mem::take(&mut self.needs_redraw) {
            ctx.request_repaint();
        }
    }
}
