use anyhow::Result;
use clientflow_core::{DuplicationResult, WorkflowSummary};
use colored::Colorize;
use comfy_table::{Cell, Table};

pub fn print_table(table: Table) -> Result<()> {
    println!("{table}");
    Ok(())
}

pub fn workflows_table<'a>(workflows: impl IntoIterator<Item = &'a WorkflowSummary>) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Active", "Nodes"]);
    for workflow in workflows {
        table.add_row(vec![
            Cell::new(&workflow.id),
            Cell::new(&workflow.name),
            Cell::new(if workflow.active { "yes" } else { "no" }),
            Cell::new(workflow.nodes),
        ]);
    }
    table
}

pub fn results_table(results: &[DuplicationResult]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Client", "Status", "Workflow ID", "Name / Error"]);
    for result in results {
        let detail = match (&result.error, &result.workflow_name) {
            (Some(error), _) => error.clone(),
            (None, Some(name)) => name.clone(),
            (None, None) => "-".to_string(),
        };
        table.add_row(vec![
            Cell::new(&result.client_name),
            Cell::new(status_label(result)),
            Cell::new(result.new_workflow_id.as_deref().unwrap_or("-")),
            Cell::new(detail),
        ]);
    }
    table
}

pub fn status_label(result: &DuplicationResult) -> String {
    if result.success {
        if result.activated {
            "active".green().to_string()
        } else {
            "created".green().to_string()
        }
    } else if result.is_partial() {
        "inactive".yellow().to_string()
    } else {
        "failed".red().to_string()
    }
}
