// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! In-memory project list and active project, kept in step with storage.

use crate::io::storage::{KeyValueStore, ProjectStore};
use crate::models::project::{Project, ProjectPatch, DEFAULT_PROJECT_NAME};
use crate::ui::interaction::CanvasAction;

pub struct ProjectState<S> {
    store: ProjectStore<S>,
    projects: Vec<Project>,
    active: Option<Project>,
}

impl<S: KeyValueStore> ProjectState<S> {
    /// Load the project list from storage.
    pub fn new(store: ProjectStore<S>) -> Self {
        let projects = store.list();
        log::info!("Loaded {} projects", projects.len());
        Self {
            store,
            projects,
            active: None,
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Projects ordered most recently modified first.
    pub fn sorted_projects(&self) -> Vec<&Project> {
        let mut sorted: Vec<&Project> = self.projects.iter().collect();
        sorted.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
        sorted
    }

    pub fn active(&self) -> Option<&Project> {
        self.active.as_ref()
    }

    /// Make the stored project with `id` active (or clear it if absent).
    pub fn load_project(&mut self, id: &str) -> Option<&Project> {
        self.active = self.store.get(id);
        if self.active.is_none() {
            log::warn!("Project {} not found", id);
        }
        self.active.as_ref()
    }

    /// Create, persist and activate an empty project. Returns its id.
    pub fn create_new_project(&mut self) -> String {
        let project = Project::new(DEFAULT_PROJECT_NAME);
        let id = project.id.clone();
        self.store.save(&project);
        self.projects.push(project.clone());
        self.active = Some(project);
        log::info!("Created project {}", id);
        id
    }

    pub fn delete_project(&mut self, id: &str) {
        self.store.delete(id);
        self.projects.retain(|p| p.id != id);
        if self.active.as_ref().is_some_and(|p| p.id == id) {
            self.active = None;
        }
        log::info!("Deleted project {}", id);
    }

    /// Persist `project` and replace its in-memory copies.
    pub fn update_project(&mut self, project: Project) {
        self.store.save(&project);
        if let Some(slot) = self.projects.iter_mut().find(|p| p.id == project.id) {
            *slot = project.clone();
        }
        if self.active.as_ref().is_some_and(|p| p.id == project.id) {
            self.active = Some(project);
        }
    }

    /// Apply a patch to the active project. Returns false when none is active.
    pub fn update_active(&mut self, patch: ProjectPatch) -> bool {
        let Some(mut project) = self.active.clone() else {
            return false;
        };
        project.apply(patch);
        self.update_project(project);
        true
    }

    /// Fold one frame of canvas actions into a single dot patch on the
    /// active project. Returns true if anything was saved.
    pub fn apply_canvas_actions(&mut self, actions: Vec<CanvasAction>) -> bool {
        let Some(mut working) = self.active.clone() else {
            return false;
        };
        let mut changed = false;
        for action in actions {
            match action {
                CanvasAction::AddDot(dot) => {
                    working.add_dot(dot);
                    log::debug!("Added dot {} at ({:.1}, {:.1})", working.dots.len(), dot.x, dot.y);
                    changed = true;
                }
                CanvasAction::MoveDot(index, dot) => {
                    changed |= working.move_dot(index, dot);
                }
                CanvasAction::DeleteDot(index) => {
                    if working.remove_dot(index).is_some() {
                        log::debug!("Deleted dot {}", index + 1);
                        changed = true;
                    }
                }
                CanvasAction::Pan(_) => {}
            }
        }
        changed && self.update_active(ProjectPatch::dots(working.dots))
    }

    /// Store an imported project. Ids that are not UUIDs, or that are
    /// already taken, are replaced with a fresh one. Returns `None` if the
    /// project could not be saved.
    pub fn import_project(&mut self, mut project: Project) -> Option<String> {
        let taken = self.projects.iter().any(|p| p.id == project.id)
            || self.store.get(&project.id).is_some();
        if taken || uuid::Uuid::parse_str(&project.id).is_err() {
            project.id = uuid::Uuid::new_v4().to_string();
        }
        project.touch();
        let id = project.id.clone();
        if !self.store.save(&project) {
            return None;
        }
        self.projects.push(project);
        log::info!("Imported project {}", id);
        Some(id)
    }
}
