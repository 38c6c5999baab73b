// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project file serialization and deserialization.
//!
//! JSON is the canonical on-disk form of a project: the same text is used
//! for file export, storage records and remote upload.

use crate::io::export::to_json_string;
use crate::models::project::Project;
use anyhow::{Context, Result};
use std::path::Path;

/// Export project data to a JSON file.
pub fn export_json(project: &Project, path: &Path) -> Result<()> {
    let json = to_json_string(project)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Import project data from a JSON file.
pub fn import_json(path: &Path) -> Result<Project> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let project = serde_json::from_str(&json)
        .with_context(|| format!("Invalid project file {}", path.display()))?;
    Ok(project)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::dot::Dot;

    #[test]
    fn test_export_import_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("art.json");

        let mut project = Project::new("art");
        project.dots.push(Dot::new(1.0, 2.0));
        export_json(&project, &path).unwrap();

        assert_eq!(import_json(&path).unwrap(), project);
    }

    #[test]
    fn test_import_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(import_json(&path).is_err());
        assert!(import_json(&dir.path().join("missing.json")).is_err());
    }
}
