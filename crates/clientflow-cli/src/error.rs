use clientflow_core::{CoreError, ErrorKind};
use colored::Colorize;

pub fn handle_error(err: anyhow::Error) -> ! {
    eprintln!("{} {:#}", "Error:".red().bold(), err);

    let msg = err.to_string().to_lowercase();

    if let Some(core_err) = err.downcast_ref::<CoreError>() {
        match core_err {
            CoreError::Config(_) => {
                eprintln!("\n{}", "Suggestion:".yellow().bold());
                eprintln!("  Point ClientFlow at your n8n instance with:");
                eprintln!("  {} export N8N_BASE_URL=https://n8n.example.com", "$".dimmed());
                eprintln!("  {} export N8N_API_KEY=<key>", "$".dimmed());
            }
            CoreError::FolderNotFound(_) => {
                eprintln!("\n{}", "Suggestion:".yellow().bold());
                eprintln!("  List the available folders with:");
                eprintln!("  {} clientflow folders", "$".dimmed());
            }
            _ if core_err.kind() == ErrorKind::NotFound => {
                eprintln!("\n{}", "Suggestion:".yellow().bold());
                eprintln!("  List template workflows with:");
                eprintln!("  {} clientflow templates", "$".dimmed());
            }
            _ if core_err.kind() == ErrorKind::RemoteUnavailable => {
                eprintln!("\n{}", "Suggestion:".yellow().bold());
                eprintln!("  Check that the n8n instance is running and reachable.");
            }
            _ => {}
        }
    } else if msg.contains("connection refused") || msg.contains("network") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  Check your internet connection and try again.");
    }

    std::process::exit(1);
}
