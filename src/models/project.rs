// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project data model.
//!
//! A project is a named drawing: an ordered dot sequence plus the styling
//! options used by the canvas and the exporters. Projects are serialized
//! with camelCase keys so stored records and exported JSON share one shape.

use super::dot::Dot;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PROJECT_NAME: &str = "Untitled Project";
pub const DEFAULT_DOT_SIZE: f64 = 5.0;
pub const DEFAULT_LINE_THICKNESS: f64 = 2.0;
pub const DEFAULT_COLOR: &str = "#000000";

/// How consecutive dots are joined. Only straight segments are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Straight,
    Curved,
}

/// Reference image for tracing. Stored with the project but never drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundImage {
    pub src: String,
    pub width: u32,
    pub height: u32,
}

/// Complete project data for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub dots: Vec<Dot>,
    /// Milliseconds since the Unix epoch.
    pub last_modified: i64,
    #[serde(default)]
    pub line_style: LineStyle,
    #[serde(default = "default_dot_size")]
    pub dot_size: f64,
    #[serde(default = "default_line_thickness")]
    pub line_thickness: f64,
    #[serde(default = "default_color")]
    pub dot_color: String,
    #[serde(default = "default_color")]
    pub line_color: String,
    #[serde(default = "default_show_lines")]
    pub show_lines: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<BackgroundImage>,
}

fn default_dot_size() -> f64 {
    DEFAULT_DOT_SIZE
}

fn default_line_thickness() -> f64 {
    DEFAULT_LINE_THICKNESS
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

fn default_show_lines() -> bool {
    true
}

/// Current time in epoch milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Whole-field update from the editor. Every `Some` field replaces the
/// project's value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub dots: Option<Vec<Dot>>,
    pub line_style: Option<LineStyle>,
    pub dot_size: Option<f64>,
    pub line_thickness: Option<f64>,
    pub dot_color: Option<String>,
    pub line_color: Option<String>,
    pub show_lines: Option<bool>,
}

impl ProjectPatch {
    /// Patch replacing only the dot list.
    pub fn dots(dots: Vec<Dot>) -> Self {
        Self {
            dots: Some(dots),
            ..Default::default()
        }
    }
}

impl Project {
    /// Create an empty project with a fresh id and default styling.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            dots: Vec::new(),
            last_modified: now_millis(),
            line_style: LineStyle::default(),
            dot_size: DEFAULT_DOT_SIZE,
            line_thickness: DEFAULT_LINE_THICKNESS,
            dot_color: default_color(),
            line_color: default_color(),
            show_lines: true,
            background_image: None,
        }
    }

    /// Stamp the modification time.
    pub fn touch(&mut self) {
        self.last_modified = now_millis();
    }

    /// Apply an editor patch and stamp the modification time.
    pub fn apply(&mut self, patch: ProjectPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(dots) = patch.dots {
            self.dots = dots;
        }
        if let Some(line_style) = patch.line_style {
            self.line_style = line_style;
        }
        if let Some(dot_size) = patch.dot_size {
            self.dot_size = dot_size;
        }
        if let Some(line_thickness) = patch.line_thickness {
            self.line_thickness = line_thickness;
        }
        if let Some(dot_color) = patch.dot_color {
            self.dot_color = dot_color;
        }
        if let Some(line_color) = patch.line_color {
            self.line_color = line_color;
        }
        if let Some(show_lines) = patch.show_lines {
            self.show_lines = show_lines;
        }
        self.touch();
    }

    /// Append a dot; it takes the next sequential number.
    pub fn add_dot(&mut self, dot: Dot) {
        self.dots.push(dot);
        self.touch();
    }

    /// Replace the coordinates of the dot at `index` without reordering.
    pub fn move_dot(&mut self, index: usize, dot: Dot) -> bool {
        match self.dots.get_mut(index) {
            Some(slot) => {
                *slot = dot;
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Remove exactly the dot at `index`; later dots shift down by one.
    pub fn remove_dot(&mut self, index: usize) -> Option<Dot> {
        if index < self.dots.len() {
            let removed = self.dots.remove(index);
            self.touch();
            Some(removed)
        } else {
            None
        }
    }

    pub fn clear_dots(&mut self) {
        self.dots.clear();
        self.touch();
    }

    /// Name used for exported files.
    pub fn file_stem(&self) -> &str {
        if self.name.is_empty() {
            "project"
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Project {
        let mut project = Project::new("sample");
        project.dots = vec![Dot::new(0.0, 0.0), Dot::new(10.0, 0.0), Dot::new(10.0, 10.0)];
        project
    }

    #[test]
    fn test_new_project_defaults() {
        let project = Project::new(DEFAULT_PROJECT_NAME);
        assert!(project.dots.is_empty());
        assert_eq!(project.line_style, LineStyle::Straight);
        assert_eq!(project.dot_size, 5.0);
        assert_eq!(project.line_thickness, 2.0);
        assert!(project.show_lines);
        assert!(project.background_image.is_none());
        assert!(uuid::Uuid::parse_str(&project.id).is_ok());
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(Project::new("a").id, Project::new("a").id);
    }

    #[test]
    fn test_remove_dot_shifts_later_dots() {
        let mut project = sample();
        let removed = project.remove_dot(1);
        assert_eq!(removed, Some(Dot::new(10.0, 0.0)));
        assert_eq!(project.dots, vec![Dot::new(0.0, 0.0), Dot::new(10.0, 10.0)]);
        assert_eq!(project.remove_dot(5), None);
        assert_eq!(project.dots.len(), 2);
    }

    #[test]
    fn test_move_dot_keeps_order() {
        let mut project = sample();
        assert!(project.move_dot(0, Dot::new(-5.0, 3.0)));
        assert_eq!(project.dots[0], Dot::new(-5.0, 3.0));
        assert_eq!(project.dots[1], Dot::new(10.0, 0.0));
        assert!(!project.move_dot(3, Dot::new(1.0, 1.0)));
    }

    #[test]
    fn test_apply_patch_replaces_present_fields_only() {
        let mut project = sample();
        project.last_modified = 0;
        project.apply(ProjectPatch {
            show_lines: Some(false),
            dot_color: Some("#ff0000".to_string()),
            ..Default::default()
        });
        assert!(!project.show_lines);
        assert_eq!(project.dot_color, "#ff0000");
        assert_eq!(project.name, "sample");
        assert_eq!(project.dots.len(), 3);
        assert!(project.last_modified > 0);
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("lastModified").is_some());
        assert!(json.get("showLines").is_some());
        assert_eq!(json["lineStyle"], "straight");
        assert!(json.get("backgroundImage").is_none());
    }

    #[test]
    fn test_missing_styling_fields_take_defaults() {
        let json = r#"{"id":"abc","name":"old","dots":[{"x":1,"y":2}],"lastModified":7}"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.dots, vec![Dot::new(1.0, 2.0)]);
        assert_eq!(project.dot_size, DEFAULT_DOT_SIZE);
        assert_eq!(project.line_color, DEFAULT_COLOR);
        assert!(project.show_lines);
    }

    #[test]
    fn test_file_stem_falls_back() {
        let mut project = sample();
        assert_eq!(project.file_stem(), "sample");
        project.name.clear();
        assert_eq!(project.file_stem(), "project");
    }
}
