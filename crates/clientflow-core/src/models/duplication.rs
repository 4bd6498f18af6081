use crate::error::{CoreError, ErrorKind};
use serde::{Deserialize, Serialize};

/// Options recognized by the duplicator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateOptions {
    /// Activate the new workflow after creation
    #[serde(default = "default_activate")]
    pub activate: bool,
    /// Appended to the template name; defaults to the client name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_suffix: Option<String>,
}

fn default_activate() -> bool {
    true
}

impl Default for DuplicateOptions {
    fn default() -> Self {
        Self {
            activate: true,
            name_suffix: None,
        }
    }
}

impl DuplicateOptions {
    pub fn without_activation(mut self) -> Self {
        self.activate = false;
        self
    }

    pub fn with_name_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.name_suffix = Some(suffix.into());
        self
    }
}

/// Step of the duplication pipeline that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicationStage {
    Validate,
    Fetch,
    Create,
    Activate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicationFailure {
    pub stage: DuplicationStage,
    pub kind: ErrorKind,
    pub message: String,
}

/// Outcome of duplicating one template for one client.
///
/// `success` is true only when every requested step completed. A failure at the
/// `activate` stage still carries `new_workflow_id`: the workflow exists remotely
/// but may be inactive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicationResult {
    pub template_id: String,
    pub client_name: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_workflow_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow_name: Option<String>,
    pub activated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<DuplicationFailure>,
}

impl DuplicationResult {
    pub(crate) fn created(
        template_id: &str,
        client_name: &str,
        new_workflow_id: String,
        workflow_name: String,
        activated: bool,
    ) -> Self {
        Self {
            template_id: template_id.to_string(),
            client_name: client_name.to_string(),
            success: true,
            new_workflow_id: Some(new_workflow_id),
            workflow_name: Some(workflow_name),
            activated,
            error: None,
            failure: None,
        }
    }

    pub(crate) fn failed(
        template_id: &str,
        client_name: &str,
        stage: DuplicationStage,
        err: &CoreError,
    ) -> Self {
        Self {
            template_id: template_id.to_string(),
            client_name: client_name.to_string(),
            success: false,
            new_workflow_id: None,
            workflow_name: None,
            activated: false,
            error: Some(err.to_string()),
            failure: Some(DuplicationFailure {
                stage,
                kind: err.kind(),
                message: err.to_string(),
            }),
        }
    }

    /// The workflow was created but activation failed
    pub fn is_partial(&self) -> bool {
        !self.success && self.new_workflow_id.is_some()
    }

    pub fn failed_stage(&self) -> Option<DuplicationStage> {
        self.failure.as_ref().map(|f| f.stage)
    }
}

/// Outcome of duplicating every workflow of a folder for one client
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderDuplicationResult {
    pub folder_path: String,
    pub client_name: String,
    pub success: bool,
    pub results: Vec<DuplicationResult>,
}

impl FolderDuplicationResult {
    pub fn created_workflow_ids(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter_map(|r| r.new_workflow_id.as_deref())
            .collect()
    }
}
