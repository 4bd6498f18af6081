use crate::ClientFlow;
use crate::error::{CoreError, Result};
use crate::folders::{classify, normalize_path};
use crate::models::{
    ClientData, DuplicateOptions, DuplicationResult, FolderDuplicationResult, FolderView,
    Workflow, WorkflowList, WorkflowSummary,
};
use std::collections::{BTreeMap, HashMap};
use tracing::{error, info, warn};

/// Remote workflows that are not archived. List failures propagate.
pub async fn list_active_workflows(core: &ClientFlow) -> Result<Vec<Workflow>> {
    let workflows = core.api.list_workflows().await.map_err(|e| {
        error!(error = %e, "Failed to list workflows");
        e
    })?;
    let total = workflows.len();
    let active: Vec<Workflow> = workflows.into_iter().filter(|w| !w.archived).collect();
    info!(total, non_archived = active.len(), "Retrieved workflows");
    Ok(active)
}

/// Re-classify and assign every non-archived workflow.
///
/// Uses `workflows` when given (wrapped or bare list), otherwise fetches the
/// full remote list. Returns the number of workflows assigned.
pub async fn auto_organize_all(core: &ClientFlow, workflows: Option<WorkflowList>) -> Result<usize> {
    let workflows = match workflows {
        Some(list) => list.into_workflows(),
        None => list_active_workflows(core).await?,
    };
    let organized = core.folders.organize(&workflows).await?;
    info!(organized, "Auto-organized workflows");
    Ok(organized)
}

/// Folder path → folder with its workflows resolved against the remote list.
///
/// Seeds the default folders and files workflows that have no folder yet;
/// existing assignments are kept. Ids no longer present remotely are omitted.
pub async fn get_folder_structure(core: &ClientFlow) -> Result<BTreeMap<String, FolderView>> {
    let workflows = list_active_workflows(core).await?;
    core.folders.ensure_default_folders()?;

    for workflow in &workflows {
        let id = workflow.id_str();
        if id.is_empty() || core.folders.folder_of(id).is_some() {
            continue;
        }
        core.folders.assign(id, &classify(&workflow.name)).await?;
    }

    let by_id: HashMap<&str, &Workflow> = workflows.iter().map(|w| (w.id_str(), w)).collect();

    Ok(core
        .folders
        .folders()
        .into_iter()
        .map(|folder| {
            let summaries = folder
                .workflows
                .iter()
                .filter_map(|id| by_id.get(id.as_str()))
                .map(|w| WorkflowSummary::from(*w))
                .collect();
            let view = FolderView {
                name: folder.name,
                path: folder.path.clone(),
                workflows: summaries,
                created: folder.created,
            };
            (folder.path, view)
        })
        .collect())
}

/// Non-archived workflows named as templates or tagged `template`
pub async fn list_templates(core: &ClientFlow) -> Result<Vec<Workflow>> {
    let templates = list_active_workflows(core)
        .await?
        .into_iter()
        .filter(|w| w.name.contains("TEMPLATE") || w.has_tag("template"))
        .collect();
    Ok(templates)
}

/// File a successfully created copy into its classified folder
pub async fn file_duplicated(core: &ClientFlow, result: &DuplicationResult) -> Option<String> {
    let (Some(id), Some(name)) = (&result.new_workflow_id, &result.workflow_name) else {
        return None;
    };
    match core.folders.assign(id, &classify(name)).await {
        Ok(path) => Some(path),
        Err(e) => {
            warn!(workflow_id = %id, error = %e, "Failed to file duplicated workflow");
            None
        }
    }
}

/// Duplicate one template for one client and file the copy
pub async fn onboard_client(
    core: &ClientFlow,
    template_id: &str,
    client: &ClientData,
    options: &DuplicateOptions,
) -> DuplicationResult {
    let result = core.duplicator.duplicate(template_id, client, options).await;
    file_duplicated(core, &result).await;
    result
}

/// Duplicate every workflow assigned to `folder_path` for one client
pub async fn duplicate_folder(
    core: &ClientFlow,
    folder_path: &str,
    client: &ClientData,
    options: &DuplicateOptions,
) -> Result<FolderDuplicationResult> {
    let path = normalize_path(folder_path)?;
    let folder = core
        .folders
        .folder(&path)
        .ok_or_else(|| CoreError::FolderNotFound(path.clone()))?;
    if folder.is_empty() {
        return Err(CoreError::Validation(format!(
            "folder {path} has no workflows to duplicate"
        )));
    }

    info!(folder = %path, client = %client.name, count = folder.workflows.len(), "Duplicating folder");

    let mut results = Vec::with_capacity(folder.workflows.len());
    for template_id in &folder.workflows {
        results.push(onboard_client(core, template_id, client, options).await);
    }

    Ok(FolderDuplicationResult {
        folder_path: path,
        client_name: client.name.clone(),
        success: results.iter().all(|r| r.success),
        results,
    })
}
