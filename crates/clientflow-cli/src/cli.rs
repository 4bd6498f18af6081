use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "clientflow")]
#[command(version, about = "ClientFlow - template duplication and folder organization for n8n")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List template workflows
    Templates,

    /// Duplicate a template for one client
    Duplicate(DuplicateArgs),

    /// Duplicate a template for every client in a JSON array
    Batch(BatchArgs),

    /// Duplicate every workflow in a folder for one client
    DuplicateFolder(DuplicateFolderArgs),

    /// Classify and file every workflow
    Organize,

    /// Show the folder structure
    Folders,

    /// Show the folder a workflow name would be filed into
    Classify {
        /// Workflow name
        name: String,
    },

    /// Write a workflow to a JSON file
    Export(ExportArgs),

    /// Create a workflow from a JSON file
    Import(ImportArgs),
}

#[derive(Args)]
pub struct DuplicateArgs {
    /// Template workflow ID
    pub template_id: String,

    /// Client JSON file
    #[arg(long)]
    pub client: PathBuf,

    /// Name suffix (defaults to the client name)
    #[arg(long)]
    pub suffix: Option<String>,

    /// Leave the new workflow inactive
    #[arg(long)]
    pub no_activate: bool,
}

#[derive(Args)]
pub struct BatchArgs {
    /// Template workflow ID
    pub template_id: String,

    /// JSON file holding an array of clients
    #[arg(long)]
    pub clients: PathBuf,

    /// Leave the new workflows inactive
    #[arg(long)]
    pub no_activate: bool,
}

#[derive(Args)]
pub struct DuplicateFolderArgs {
    /// Folder path, e.g. "Templates/Pet Clinic Templates"
    pub folder: String,

    /// Client JSON file
    #[arg(long)]
    pub client: PathBuf,

    /// Leave the new workflows inactive
    #[arg(long)]
    pub no_activate: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Workflow ID
    pub workflow_id: String,

    /// Output directory
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
}

#[derive(Args)]
pub struct ImportArgs {
    /// Workflow JSON file
    pub file: PathBuf,

    /// Activate the workflow after creating it
    #[arg(long)]
    pub activate: bool,

    /// Folder to file the workflow into (defaults to its classified folder)
    #[arg(long)]
    pub folder: Option<String>,
}
