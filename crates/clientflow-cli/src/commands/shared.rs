use anyhow::{Context, Result};
use clientflow_core::{ClientData, DuplicateOptions};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("Invalid JSON in {}", path.display()))
}

pub fn load_client(path: &Path) -> Result<ClientData> {
    let client: ClientData = read_json(path)?;
    client.validate()?;
    Ok(client)
}

pub fn load_clients(path: &Path) -> Result<Vec<ClientData>> {
    let clients: Vec<ClientData> = read_json(path)?;
    if clients.is_empty() {
        anyhow::bail!("No clients in {}", path.display());
    }
    Ok(clients)
}

pub fn duplicate_options(no_activate: bool, suffix: Option<String>) -> DuplicateOptions {
    let options = DuplicateOptions::default();
    let options = if no_activate {
        options.without_activation()
    } else {
        options
    };
    match suffix {
        Some(suffix) => options.with_name_suffix(suffix),
        None => options,
    }
}

/// File name for an exported workflow: every non-alphanumeric character becomes `_`
pub fn export_file_name(workflow_name: &str) -> String {
    let stem: String = workflow_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{stem}.json")
}
