use anyhow::Result;
use clientflow_core::services::organizer;
use clientflow_core::{ClientFlow, WorkflowSummary};

use crate::output::table::{print_table, workflows_table};
use crate::output::{OutputFormat, json::print_json};

pub async fn run(core: &ClientFlow, format: OutputFormat) -> Result<()> {
    let templates: Vec<WorkflowSummary> = organizer::list_templates(core)
        .await?
        .iter()
        .map(WorkflowSummary::from)
        .collect();

    if format.is_json() {
        return print_json(&templates);
    }

    if templates.is_empty() {
        println!("No templates found");
        return Ok(());
    }

    print_table(workflows_table(&templates))?;
    println!("{} template(s)", templates.len());
    Ok(())
}
