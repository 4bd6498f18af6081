use anyhow::{Context, Result};
use clientflow_core::folders::classify;
use clientflow_core::{ClientFlow, Workflow};
use serde_json::json;
use std::fs;
use tracing::info;

use crate::cli::{ExportArgs, ImportArgs};
use crate::commands::shared::{export_file_name, read_json};
use crate::output::{OutputFormat, json::print_json};

pub async fn export(core: &ClientFlow, args: ExportArgs, format: OutputFormat) -> Result<()> {
    let workflow = core.api.get_workflow(&args.workflow_id).await?;

    fs::create_dir_all(&args.out)
        .with_context(|| format!("Failed to create {}", args.out.display()))?;
    let path = args.out.join(export_file_name(&workflow.name));
    fs::write(&path, serde_json::to_string_pretty(&workflow)?)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(workflow_id = %args.workflow_id, path = %path.display(), "Exported workflow");

    if format.is_json() {
        return print_json(&json!({ "id": args.workflow_id, "path": path }));
    }

    println!("Exported {} to {}", workflow.name, path.display());
    Ok(())
}

pub async fn import(core: &ClientFlow, args: ImportArgs, format: OutputFormat) -> Result<()> {
    let workflow: Workflow = read_json(&args.file)?;
    if workflow.name.trim().is_empty() {
        anyhow::bail!("Workflow in {} has no name", args.file.display());
    }

    // The creation payload carries neither the source id nor its versionId.
    let request = workflow.to_create_request(workflow.name.clone());
    let created = core.api.create_workflow(&request).await?;
    let id = created.id_str().to_string();

    if args.activate {
        core.api.activate_workflow(&id).await?;
    }

    let target = args.folder.unwrap_or_else(|| classify(&request.name));
    let folder = core.folders.assign(&id, &target).await?;

    if format.is_json() {
        return print_json(&json!({
            "id": id,
            "name": created.name,
            "activated": args.activate,
            "folder": folder,
        }));
    }

    println!("Imported {} ({id})", request.name);
    if args.activate {
        println!("Workflow activated");
    }
    println!("Filed under {folder}");
    Ok(())
}
