use super::workflow::Workflow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Virtual folder node in the local folder tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Folder {
    pub name: String,
    pub path: String,
    /// Workflow ids in assignment order, without duplicates
    pub workflows: Vec<String>,
    pub created: DateTime<Utc>,
}

impl Folder {
    pub fn new(path: &str) -> Self {
        let name = path.rsplit('/').next().unwrap_or(path).to_string();
        Self {
            name,
            path: path.to_string(),
            workflows: Vec::new(),
            created: Utc::now(),
        }
    }

    pub fn contains(&self, workflow_id: &str) -> bool {
        self.workflows.iter().any(|id| id == workflow_id)
    }

    pub fn is_empty(&self) -> bool {
        self.workflows.is_empty()
    }
}

/// Folder with its workflows resolved against the remote list
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FolderView {
    pub name: String,
    pub path: String,
    pub workflows: Vec<WorkflowSummary>,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkflowSummary {
    pub id: String,
    pub name: String,
    pub active: bool,
    pub nodes: usize,
    pub archived: bool,
}

impl From<&Workflow> for WorkflowSummary {
    fn from(workflow: &Workflow) -> Self {
        Self {
            id: workflow.id_str().to_string(),
            name: workflow.name.clone(),
            active: workflow.active,
            nodes: workflow.nodes.len(),
            archived: workflow.archived,
        }
    }
}
