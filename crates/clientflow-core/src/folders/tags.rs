use crate::models::Tag;
use crate::remote::WorkflowApi;
use std::sync::Arc;
use tracing::{debug, warn};

/// Remote tags encoding a folder path: the top-level segment, then the full path
pub fn folder_tags(path: &str) -> Vec<String> {
    let top = path.split('/').next().unwrap_or(path);
    let mut tags = vec![top.to_string()];
    if top != path {
        tags.push(path.to_string());
    }
    tags
}

/// Whether `tag` encodes a folder under one of `roots`
pub fn is_folder_tag(tag: &str, roots: &[String]) -> bool {
    roots.iter().any(|root| {
        tag == root
            || tag
                .strip_prefix(root.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

/// Tag set for a workflow moving to `folder_path`.
///
/// Tags that do not encode a folder are kept in their original order; stale
/// folder tags are dropped and the new folder tags appended.
pub fn merge_folder_tags(existing: &[Tag], folder_path: &str, roots: &[String]) -> Vec<String> {
    let new_tags = folder_tags(folder_path);
    let mut roots = roots.to_vec();
    if !roots.contains(&new_tags[0]) {
        roots.push(new_tags[0].clone());
    }

    let mut merged: Vec<String> = existing
        .iter()
        .map(|tag| tag.name.clone())
        .filter(|name| !is_folder_tag(name, &roots))
        .collect();
    for tag in new_tags {
        if !merged.contains(&tag) {
            merged.push(tag);
        }
    }
    merged
}

/// Best-effort mirror of folder membership into remote workflow tags
#[derive(Clone)]
pub struct TagMirror {
    api: Arc<dyn WorkflowApi>,
}

impl TagMirror {
    pub fn new(api: Arc<dyn WorkflowApi>) -> Self {
        Self { api }
    }

    /// Push the folder tags for one workflow, keeping its unrelated tags.
    ///
    /// `roots` are the top-level folder names whose tags may be replaced.
    /// Failures are logged, never returned; nothing is written when the current
    /// tags cannot be read.
    pub async fn notify(&self, workflow_id: &str, folder_path: &str, roots: &[String]) -> bool {
        let current = match self.api.get_workflow(workflow_id).await {
            Ok(workflow) => workflow.tags,
            Err(e) => {
                warn!(
                    workflow_id,
                    folder = folder_path,
                    error = %e,
                    "Failed to read workflow tags, skipping mirror"
                );
                return false;
            }
        };

        let tags = merge_folder_tags(&current, folder_path, roots);
        match self.api.update_workflow_tags(workflow_id, &tags).await {
            Ok(()) => {
                debug!(workflow_id, folder = folder_path, "Mirrored folder tags");
                true
            }
            Err(e) => {
                warn!(
                    workflow_id,
                    folder = folder_path,
                    error = %e,
                    "Failed to mirror folder tags"
                );
                false
            }
        }
    }
}
