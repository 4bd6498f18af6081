//! Virtual folder organization for remote workflows
//!
//! Folders exist only locally. The tree and the workflow index live in a
//! [`FolderStore`] owned by the [`FolderManager`]; when a [`TagMirror`] is
//! configured, assignments are also pushed to the remote platform as tags.

pub mod classifier;
pub mod store;
pub mod tags;

pub use classifier::{
    CLIENTS_ROOT, DEFAULT_FOLDERS, DOMAIN_RULES, DomainRule, TEMPLATES_ROOT, WorkflowCategory,
    classify,
};
pub use store::{FolderStore, normalize_path};
pub use tags::{TagMirror, folder_tags, is_folder_tag, merge_folder_tags};

use crate::error::Result;
use crate::models::{Folder, Workflow};
use crate::remote::WorkflowApi;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info};

pub struct FolderManager {
    store: RwLock<FolderStore>,
    mirror: Option<TagMirror>,
}

impl Default for FolderManager {
    fn default() -> Self {
        Self::new()
    }
}

impl FolderManager {
    /// Local-only folder manager
    pub fn new() -> Self {
        Self {
            store: RwLock::new(FolderStore::new()),
            mirror: None,
        }
    }

    /// Folder manager that mirrors every assignment into remote tags
    pub fn with_tag_mirror(api: Arc<dyn WorkflowApi>) -> Self {
        Self {
            store: RwLock::new(FolderStore::new()),
            mirror: Some(TagMirror::new(api)),
        }
    }

    pub fn mirrors_tags(&self) -> bool {
        self.mirror.is_some()
    }

    pub fn classify(&self, workflow_name: &str) -> String {
        classify(workflow_name)
    }

    pub fn create_folder(&self, path: &str) -> Result<Folder> {
        self.store.write().create_folder(path)
    }

    /// Assign a workflow to a folder, creating the folder and its ancestors.
    ///
    /// The local move is committed before the optional tag update; a failed
    /// tag update is logged and does not affect the result.
    pub async fn assign(&self, workflow_id: &str, folder_path: &str) -> Result<String> {
        let (path, changed, roots) = {
            let mut store = self.store.write();
            let (path, changed) = store.assign(workflow_id, folder_path)?;
            (path, changed, store.roots())
        };
        if changed {
            info!(workflow_id, folder = %path, "Assigned workflow to folder");
        } else {
            debug!(workflow_id, folder = %path, "Workflow already in folder");
        }

        if let Some(mirror) = &self.mirror {
            let mut roots = roots;
            for root in [TEMPLATES_ROOT, CLIENTS_ROOT] {
                if !roots.iter().any(|r| r == root) {
                    roots.push(root.to_string());
                }
            }
            mirror.notify(workflow_id, &path, &roots).await;
        }
        Ok(path)
    }

    /// Classify and assign every non-archived workflow in `workflows`.
    ///
    /// Workflows not in the list keep their current assignment. Returns the
    /// number of workflows assigned.
    pub async fn organize(&self, workflows: &[Workflow]) -> Result<usize> {
        let mut organized = 0;
        for workflow in workflows {
            if workflow.archived {
                debug!(workflow = %workflow.name, "Skipping archived workflow");
                continue;
            }
            let Some(id) = workflow.id.as_deref().filter(|id| !id.is_empty()) else {
                debug!(workflow = %workflow.name, "Skipping workflow without id");
                continue;
            };
            self.assign(id, &classify(&workflow.name)).await?;
            organized += 1;
        }
        Ok(organized)
    }

    pub fn delete_folder(&self, path: &str) -> Result<bool> {
        let deleted = self.store.write().delete_folder(path)?;
        if deleted {
            info!(folder = path, "Deleted folder");
        }
        Ok(deleted)
    }

    pub fn reset_assignments(&self) {
        self.store.write().reset_assignments();
        info!("All folder assignments reset");
    }

    pub fn ensure_default_folders(&self) -> Result<()> {
        let mut store = self.store.write();
        for path in DEFAULT_FOLDERS {
            store.create_folder(path)?;
        }
        Ok(())
    }

    pub fn folder(&self, path: &str) -> Option<Folder> {
        self.store.read().folder(path).cloned()
    }

    pub fn folder_of(&self, workflow_id: &str) -> Option<String> {
        self.store.read().folder_of(workflow_id).map(str::to_string)
    }

    /// Point-in-time copy of every folder, sorted by path
    pub fn folders(&self) -> Vec<Folder> {
        self.store.read().folders().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::models::{CreateWorkflowRequest, Tag, Workflow};
    use async_trait::async_trait;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingApi {
        fail_tags: bool,
        fail_get: bool,
        existing_tags: Vec<Tag>,
        tag_calls: Mutex<Vec<(String, Vec<String>)>>,
    }

    #[async_trait]
    impl WorkflowApi for RecordingApi {
        async fn list_workflows(&self) -> Result<Vec<Workflow>> {
            Ok(Vec::new())
        }

        async fn get_workflow(&self, id: &str) -> Result<Workflow> {
            if self.fail_get {
                return Err(CoreError::RemoteUnavailable("timed out".to_string()));
            }
            let mut wf = Workflow::new("Existing");
            wf.id = Some(id.to_string());
            wf.tags = self.existing_tags.clone();
            Ok(wf)
        }

        async fn create_workflow(&self, _request: &CreateWorkflowRequest) -> Result<Workflow> {
            Err(CoreError::RemoteUnavailable("not supported".to_string()))
        }

        async fn activate_workflow(&self, _id: &str) -> Result<()> {
            Ok(())
        }

        async fn update_workflow_tags(&self, id: &str, tag_names: &[String]) -> Result<()> {
            self.tag_calls
                .lock()
                .push((id.to_string(), tag_names.to_vec()));
            if self.fail_tags {
                return Err(CoreError::RemoteUnavailable("tags down".to_string()));
            }
            Ok(())
        }
    }

    fn workflow(id: &str, name: &str, archived: bool) -> Workflow {
        let mut wf = Workflow::new(name);
        wf.id = Some(id.to_string());
        wf.archived = archived;
        wf
    }

    #[tokio::test]
    async fn test_assign_then_reassign() {
        let manager = FolderManager::new();
        manager.assign("wf1", "Templates/Uncategorized").await.unwrap();
        manager.assign("wf1", "Clients/General Clients").await.unwrap();

        assert!(!manager.folder("Templates/Uncategorized").unwrap().contains("wf1"));
        assert!(manager.folder("Clients/General Clients").unwrap().contains("wf1"));
        assert_eq!(manager.folder_of("wf1").as_deref(), Some("Clients/General Clients"));
    }

    #[tokio::test]
    async fn test_tag_mirror_receives_hierarchy() {
        let api = Arc::new(RecordingApi::default());
        let manager = FolderManager::with_tag_mirror(api.clone());
        manager.assign("wf1", "Clients/Pet Clinic Clients").await.unwrap();

        let calls = api.tag_calls.lock().clone();
        assert_eq!(
            calls,
            vec![(
                "wf1".to_string(),
                vec!["Clients".to_string(), "Clients/Pet Clinic Clients".to_string()]
            )]
        );
    }

    #[tokio::test]
    async fn test_tag_mirror_keeps_unrelated_tags() {
        let tag = |name: &str| Tag {
            id: Some(format!("id-{name}")),
            name: name.to_string(),
        };
        let api = Arc::new(RecordingApi {
            existing_tags: vec![tag("template"), tag("Templates"), tag("Templates/Uncategorized")],
            ..Default::default()
        });
        let manager = FolderManager::with_tag_mirror(api.clone());
        manager.assign("wf1", "Clients/Pet Clinic Clients").await.unwrap();

        let calls = api.tag_calls.lock().clone();
        assert_eq!(
            calls[0].1,
            vec![
                "template".to_string(),
                "Clients".to_string(),
                "Clients/Pet Clinic Clients".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_unreadable_tags_are_left_alone() {
        let api = Arc::new(RecordingApi {
            fail_get: true,
            ..Default::default()
        });
        let manager = FolderManager::with_tag_mirror(api.clone());

        let path = manager.assign("wf1", "Templates/Uncategorized").await.unwrap();
        assert!(manager.folder(&path).unwrap().contains("wf1"));
        assert!(api.tag_calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_tag_mirror_failure_does_not_fail_assignment() {
        let api = Arc::new(RecordingApi {
            fail_tags: true,
            ..Default::default()
        });
        let manager = FolderManager::with_tag_mirror(api.clone());

        let path = manager.assign("wf1", "Templates/Uncategorized").await.unwrap();
        assert_eq!(path, "Templates/Uncategorized");
        assert!(manager.folder(&path).unwrap().contains("wf1"));
        assert_eq!(api.tag_calls.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_organize_skips_archived_and_keeps_other_assignments() {
        let manager = FolderManager::new();
        manager.assign("manual", "Custom/Pinned").await.unwrap();

        let workflows = vec![
            workflow("wf1", "PET CLINIC TEMPLATE", false),
            workflow("wf2", "PET CLINIC - Downtown Vets", false),
            workflow("wf3", "Old Flow", true),
        ];
        let organized = manager.organize(&workflows).await.unwrap();

        assert_eq!(organized, 2);
        assert_eq!(
            manager.folder_of("wf1").as_deref(),
            Some("Templates/Pet Clinic Templates")
        );
        assert_eq!(
            manager.folder_of("wf2").as_deref(),
            Some("Clients/Pet Clinic Clients")
        );
        assert_eq!(manager.folder_of("wf3"), None);
        assert_eq!(manager.folder_of("manual").as_deref(), Some("Custom/Pinned"));
    }

    #[tokio::test]
    async fn test_organize_twice_is_stable() {
        let manager = FolderManager::new();
        let workflows = vec![workflow("wf1", "Random Thing", false)];
        manager.organize(&workflows).await.unwrap();
        manager.organize(&workflows).await.unwrap();

        let folder = manager.folder("Templates/Uncategorized").unwrap();
        assert_eq!(folder.workflows, vec!["wf1".to_string()]);
    }

    #[test]
    fn test_ensure_default_folders() {
        let manager = FolderManager::new();
        manager.ensure_default_folders().unwrap();
        for path in DEFAULT_FOLDERS {
            assert!(manager.folder(path).is_some(), "{path} missing");
        }
        assert!(manager.folder("Templates").is_some());
    }
}
