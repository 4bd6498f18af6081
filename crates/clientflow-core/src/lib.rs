pub mod config;
pub mod error;
pub mod folders;
pub mod models;
pub mod remote;
pub mod services;
pub mod template;

pub use config::ClientFlowConfig;
pub use error::{CoreError, ErrorKind, Result};
pub use models::*;

use folders::FolderManager;
use remote::{N8nClient, WorkflowApi};
use services::WorkflowDuplicator;
use std::sync::Arc;
use tracing::info;

/// Core state shared by the CLI and any embedding server
pub struct ClientFlow {
    pub api: Arc<dyn WorkflowApi>,
    pub duplicator: WorkflowDuplicator,
    pub folders: Arc<FolderManager>,
}

impl ClientFlow {
    /// Connect to the configured remote platform
    pub fn new(config: &ClientFlowConfig) -> Result<Self> {
        let client = N8nClient::new(&config.remote)?;
        info!(
            api_root = %config.remote.api_root(),
            mirror_tags = config.folders.mirror_tags,
            "Initializing ClientFlow"
        );
        Ok(Self::with_api(Arc::new(client), config.folders.mirror_tags))
    }

    /// Build on any [`WorkflowApi`] implementation
    pub fn with_api(api: Arc<dyn WorkflowApi>, mirror_tags: bool) -> Self {
        let folders = if mirror_tags {
            FolderManager::with_tag_mirror(api.clone())
        } else {
            FolderManager::new()
        };

        Self {
            duplicator: WorkflowDuplicator::new(api.clone()),
            folders: Arc::new(folders),
            api,
        }
    }
}
