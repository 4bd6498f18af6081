use anyhow::{Result, bail};
use clientflow_core::ClientFlow;
use clientflow_core::services::organizer;
use colored::Colorize;
use serde_json::json;

use crate::cli::{BatchArgs, DuplicateArgs, DuplicateFolderArgs};
use crate::commands::shared::{duplicate_options, load_client, load_clients};
use crate::output::table::{print_table, results_table, status_label};
use crate::output::{OutputFormat, json::print_json};

pub async fn duplicate(core: &ClientFlow, args: DuplicateArgs, format: OutputFormat) -> Result<()> {
    let client = load_client(&args.client)?;
    let options = duplicate_options(args.no_activate, args.suffix);

    let result = organizer::onboard_client(core, &args.template_id, &client, &options).await;

    if format.is_json() {
        print_json(&result)?;
    } else {
        println!(
            "{} {} ({})",
            status_label(&result),
            result.workflow_name.as_deref().unwrap_or(&args.template_id),
            result.new_workflow_id.as_deref().unwrap_or("-")
        );
        if let Some(folder) = result
            .new_workflow_id
            .as_deref()
            .and_then(|id| core.folders.folder_of(id))
        {
            println!("Filed under {folder}");
        }
    }

    match result.error {
        Some(error) => bail!("Duplication for {} failed: {error}", client.name),
        None => Ok(()),
    }
}

pub async fn batch(core: &ClientFlow, args: BatchArgs, format: OutputFormat) -> Result<()> {
    let clients = load_clients(&args.clients)?;
    let options = duplicate_options(args.no_activate, None);

    let mut results = Vec::with_capacity(clients.len());
    for client in &clients {
        results.push(organizer::onboard_client(core, &args.template_id, client, &options).await);
    }

    let succeeded = results.iter().filter(|r| r.success).count();
    let failed = results.len() - succeeded;

    if format.is_json() {
        return print_json(&json!({
            "templateId": args.template_id,
            "successful": succeeded,
            "failed": failed,
            "results": results,
        }));
    }

    print_table(results_table(&results))?;
    println!(
        "Deployment summary: {} successful, {} failed",
        succeeded.to_string().green(),
        if failed > 0 {
            failed.to_string().red()
        } else {
            failed.to_string().normal()
        }
    );
    Ok(())
}

pub async fn duplicate_folder(
    core: &ClientFlow,
    args: DuplicateFolderArgs,
    format: OutputFormat,
) -> Result<()> {
    let client = load_client(&args.client)?;
    let options = duplicate_options(args.no_activate, None);

    // Folder membership lives in memory, so rebuild it before looking the folder up.
    organizer::auto_organize_all(core, None).await?;
    let result = organizer::duplicate_folder(core, &args.folder, &client, &options).await?;

    if format.is_json() {
        return print_json(&result);
    }

    print_table(results_table(&result.results))?;
    let created = result.created_workflow_ids().len();
    println!(
        "{} of {} workflow(s) in {} duplicated for {}",
        created,
        result.results.len(),
        result.folder_path,
        result.client_name
    );
    Ok(())
}
