// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Local project storage.
//!
//! Projects live in a flat key-value store: one index entry holding the
//! ordered list of project ids, and one entry per project id holding the
//! serialized project. [`ProjectStore`] never returns errors; corrupt or
//! unreadable entries are logged and treated as absent.

use crate::models::project::Project;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Key holding the JSON array of project ids.
pub const PROJECT_IDS_KEY: &str = "project_ids";

/// Minimal string key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Directory-backed store: each key is a `<key>.json` file.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create storage directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            anyhow::bail!("Invalid storage key {:?}", key);
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        std::fs::write(&path, value).with_context(|| format!("Failed to write {}", path.display()))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
        }
    }
}

/// Project CRUD over a key-value store.
pub struct ProjectStore<S> {
    store: S,
}

impl<S: KeyValueStore> ProjectStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn read_ids(&self) -> Result<Vec<String>> {
        match self.store.get(PROJECT_IDS_KEY)? {
            Some(json) => serde_json::from_str(&json).context("Invalid project index"),
            None => Ok(Vec::new()),
        }
    }

    fn write_ids(&mut self, ids: &[String]) -> Result<()> {
        let json = serde_json::to_string(ids)?;
        self.store.set(PROJECT_IDS_KEY, &json)
    }

    /// Ids in insertion order; an unreadable index reads as empty.
    pub fn ids(&self) -> Vec<String> {
        self.read_ids().unwrap_or_else(|e| {
            log::error!("Error reading project ids: {:#}", e);
            Vec::new()
        })
    }

    fn check_id(id: &str) -> Result<()> {
        if id == PROJECT_IDS_KEY {
            anyhow::bail!("{:?} is reserved for the project index", id);
        }
        Ok(())
    }

    fn try_get(&self, id: &str) -> Result<Option<Project>> {
        Self::check_id(id)?;
        match self.store.get(id)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Load a single project.
    pub fn get(&self, id: &str) -> Option<Project> {
        self.try_get(id).unwrap_or_else(|e| {
            log::error!("Error reading project {}: {:#}", id, e);
            None
        })
    }

    /// All projects resolvable from the index. Missing or corrupt records
    /// are skipped.
    pub fn list(&self) -> Vec<Project> {
        self.ids().iter().filter_map(|id| self.get(id)).collect()
    }

    fn try_save(&mut self, project: &Project) -> Result<()> {
        Self::check_id(&project.id)?;
        let mut ids = self.read_ids()?;
        if !ids.iter().any(|id| *id == project.id) {
            ids.push(project.id.clone());
            self.write_ids(&ids)?;
        }
        let json = serde_json::to_string(project)?;
        self.store.set(&project.id, &json)
    }

    /// Insert or overwrite a project, indexing new ids. Returns false if
    /// the write failed (the error is logged).
    pub fn save(&mut self, project: &Project) -> bool {
        match self.try_save(project) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Error saving project {}: {:#}", project.id, e);
                false
            }
        }
    }

    fn try_delete(&mut self, id: &str) -> Result<()> {
        Self::check_id(id)?;
        let ids: Vec<String> = self.read_ids()?.into_iter().filter(|i| i != id).collect();
        self.write_ids(&ids)?;
        self.store.remove(id)
    }

    /// Remove a project from the index and delete its record.
    pub fn delete(&mut self, id: &str) {
        if let Err(e) = self.try_delete(id) {
            log::error!("Error deleting project {}: {:#}", id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::dot::Dot;

    fn memory_store() -> ProjectStore<MemoryStore> {
        ProjectStore::new(MemoryStore::new())
    }

    #[test]
    fn test_save_new_project_indexes_once() {
        let mut store = memory_store();
        let mut project = Project::new("one");
        store.save(&project);
        assert_eq!(store.ids(), vec![project.id.clone()]);

        project.dots.push(Dot::new(1.0, 1.0));
        store.save(&project);
        assert_eq!(store.ids().len(), 1);
        assert_eq!(store.get(&project.id), Some(project));
    }

    #[test]
    fn test_list_keeps_insertion_order() {
        let mut store = memory_store();
        let a = Project::new("a");
        let b = Project::new("b");
        store.save(&a);
        store.save(&b);
        store.save(&a);
        let names: Vec<String> = store.list().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_delete_removes_record_and_index() {
        let mut store = memory_store();
        let a = Project::new("a");
        let b = Project::new("b");
        store.save(&a);
        store.save(&b);
        store.delete(&a.id);

        assert_eq!(store.get(&a.id), None);
        assert_eq!(store.list(), vec![b.clone()]);
        assert_eq!(store.ids(), vec![b.id]);
    }

    #[test]
    fn test_corrupt_records_are_skipped() {
        let mut kv = MemoryStore::new();
        let good = Project::new("good");
        kv.set(
            PROJECT_IDS_KEY,
            &serde_json::to_string(&["broken", "missing", good.id.as_str()]).unwrap(),
        )
        .unwrap();
        kv.set("broken", "{ definitely not json").unwrap();
        kv.set(&good.id, &serde_json::to_string(&good).unwrap()).unwrap();

        let store = ProjectStore::new(kv);
        assert_eq!(store.get("broken"), None);
        assert_eq!(store.get("missing"), None);
        assert_eq!(store.list(), vec![good]);
    }

    #[test]
    fn test_corrupt_index_reads_as_empty() {
        let mut kv = MemoryStore::new();
        kv.set(PROJECT_IDS_KEY, "not an array").unwrap();
        let mut store = ProjectStore::new(kv);
        assert!(store.list().is_empty());

        // Saving over a corrupt index is logged, not raised.
        assert!(!store.save(&Project::new("x")));
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_index_key_is_not_a_project_id() {
        let mut store = memory_store();
        let kept = Project::new("kept");
        assert!(store.save(&kept));

        let mut intruder = Project::new("intruder");
        intruder.id = PROJECT_IDS_KEY.to_string();
        assert!(!store.save(&intruder));
        assert_eq!(store.get(PROJECT_IDS_KEY), None);
        store.delete(PROJECT_IDS_KEY);

        assert_eq!(store.ids(), vec![kept.id.clone()]);
        assert_eq!(store.list(), vec![kept]);
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let project = Project::new("on disk");
        {
            let mut store = ProjectStore::new(FileStore::open(dir.path()).unwrap());
            store.save(&project);
        }
        assert!(dir.path().join(format!("{}.json", project.id)).exists());
        assert!(dir.path().join("project_ids.json").exists());

        let mut store = ProjectStore::new(FileStore::open(dir.path()).unwrap());
        assert_eq!(store.list(), vec![project.clone()]);
        store.delete(&project.id);
        assert!(store.list().is_empty());
        assert!(!dir.path().join(format!("{}.json", project.id)).exists());
    }

    #[test]
    fn test_file_store_rejects_path_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut kv = FileStore::open(dir.path()).unwrap();
        assert!(kv.get("../escape").is_err());
        assert!(kv.set("a/b", "x").is_err());

        let store = ProjectStore::new(kv);
        assert_eq!(store.get("../escape"), None);
    }
}
