use anyhow::Result;
use clientflow_core::ClientFlow;
use clientflow_core::folders::classify;
use clientflow_core::services::organizer;
use colored::Colorize;
use comfy_table::{Cell, Table};
use serde_json::json;

use crate::output::table::print_table;
use crate::output::{OutputFormat, json::print_json};

pub async fn organize(core: &ClientFlow, format: OutputFormat) -> Result<()> {
    let organized = organizer::auto_organize_all(core, None).await?;

    if format.is_json() {
        return print_json(&json!({
            "organized": organized,
            "tagsMirrored": core.folders.mirrors_tags(),
        }));
    }

    println!("Organized {organized} workflow(s)");
    if core.folders.mirrors_tags() {
        println!("Folder tags mirrored to the remote platform");
    }
    Ok(())
}

pub async fn folders(core: &ClientFlow, format: OutputFormat) -> Result<()> {
    let structure = organizer::get_folder_structure(core).await?;

    if format.is_json() {
        return print_json(&structure);
    }

    let mut table = Table::new();
    table.set_header(vec!["Folder", "Workflows", "Names"]);
    for (path, view) in &structure {
        let names: Vec<&str> = view.workflows.iter().map(|w| w.name.as_str()).collect();
        let depth = path.matches('/').count();
        let label = format!("{}{}", "  ".repeat(depth), view.name);
        let label = if depth == 0 {
            label.bold().to_string()
        } else {
            label
        };
        table.add_row(vec![
            Cell::new(label),
            Cell::new(view.workflows.len()),
            Cell::new(names.join(", ")),
        ]);
    }
    print_table(table)
}

pub fn classify_name(name: &str, format: OutputFormat) -> Result<()> {
    let folder = classify(name);

    if format.is_json() {
        return print_json(&json!({ "name": name, "folder": folder }));
    }

    println!("{folder}");
    Ok(())
}
