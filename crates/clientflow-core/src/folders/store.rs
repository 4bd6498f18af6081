use crate::error::{CoreError, Result};
use crate::models::Folder;
use std::collections::{BTreeMap, HashMap};

/// In-memory folder tree and workflow → folder index.
///
/// Every folder's ancestors exist, and a workflow id is a member of at most
/// one folder, the one recorded in the index.
#[derive(Debug, Default, Clone)]
pub struct FolderStore {
    folders: BTreeMap<String, Folder>,
    index: HashMap<String, String>,
}

/// Trim whitespace around segments and drop empty ones: `" /A//B/ "` → `"A/B"`
pub fn normalize_path(path: &str) -> Result<String> {
    let normalized = path
        .split('/')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if normalized.is_empty() {
        return Err(CoreError::Validation("folder path must not be empty".to_string()));
    }
    Ok(normalized)
}

impl FolderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a folder and any missing ancestors; existing folders are kept as is
    pub fn create_folder(&mut self, path: &str) -> Result<Folder> {
        let path = normalize_path(path)?;
        let mut current = String::new();

        for segment in path.split('/') {
            if !current.is_empty() {
                current.push('/');
            }
            current.push_str(segment);
            if !self.folders.contains_key(&current) {
                self.folders.insert(current.clone(), Folder::new(&current));
            }
        }

        self.folders
            .get(&path)
            .cloned()
            .ok_or_else(|| CoreError::FolderNotFound(path))
    }

    /// Move a workflow into `path`, creating the folder if needed.
    ///
    /// Returns the normalized path and whether anything changed.
    pub fn assign(&mut self, workflow_id: &str, path: &str) -> Result<(String, bool)> {
        let path = normalize_path(path)?;
        self.create_folder(&path)?;

        if let Some(previous) = self.index.get(workflow_id).cloned() {
            if previous == path {
                return Ok((path, false));
            }
            if let Some(folder) = self.folders.get_mut(&previous) {
                folder.workflows.retain(|id| id != workflow_id);
            }
        }

        if let Some(folder) = self.folders.get_mut(&path) {
            if !folder.contains(workflow_id) {
                folder.workflows.push(workflow_id.to_string());
            }
        }
        self.index.insert(workflow_id.to_string(), path.clone());
        Ok((path, true))
    }

    /// Delete a folder together with its descendant folders.
    ///
    /// Fails with `FolderNotEmpty` if any of them holds workflows. Returns
    /// `false` when the folder does not exist.
    pub fn delete_folder(&mut self, path: &str) -> Result<bool> {
        let path = normalize_path(path)?;
        if !self.folders.contains_key(&path) {
            return Ok(false);
        }

        let doomed: Vec<String> = self
            .folders
            .keys()
            .filter(|p| is_same_or_descendant(p, &path))
            .cloned()
            .collect();

        if let Some(populated) = doomed
            .iter()
            .find(|p| self.folders.get(*p).is_some_and(|f| !f.is_empty()))
        {
            return Err(CoreError::FolderNotEmpty(populated.clone()));
        }

        for p in &doomed {
            self.folders.remove(p);
        }
        self.index.retain(|_, p| !doomed.contains(p));
        Ok(true)
    }

    /// Clear all assignments, keeping the folders
    pub fn reset_assignments(&mut self) {
        self.index.clear();
        for folder in self.folders.values_mut() {
            folder.workflows.clear();
        }
    }

    pub fn folder(&self, path: &str) -> Option<&Folder> {
        self.folders.get(path)
    }

    pub fn folder_of(&self, workflow_id: &str) -> Option<&str> {
        self.index.get(workflow_id).map(String::as_str)
    }

    pub fn contains_folder(&self, path: &str) -> bool {
        self.folders.contains_key(path)
    }

    /// Folders sorted by path
    pub fn folders(&self) -> impl Iterator<Item = &Folder> {
        self.folders.values()
    }

    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    /// Paths of top-level folders
    pub fn roots(&self) -> Vec<String> {
        self.folders
            .keys()
            .filter(|path| !path.contains('/'))
            .cloned()
            .collect()
    }
}

fn is_same_or_descendant(candidate: &str, root: &str) -> bool {
    candidate == root
        || candidate
            .strip_prefix(root)
            .is_some_and(|rest| rest.starts_with('/'))
}
