//! Remote workflow platform access
//!
//! [`WorkflowApi`] is the seam between the engine and the platform; the
//! reqwest-backed [`N8nClient`] is the production implementation.

mod client;

pub use client::N8nClient;

use crate::error::Result;
use crate::models::{CreateWorkflowRequest, Workflow};
use async_trait::async_trait;

#[async_trait]
pub trait WorkflowApi: Send + Sync {
    /// All workflows, archived ones included
    async fn list_workflows(&self) -> Result<Vec<Workflow>>;

    async fn get_workflow(&self, id: &str) -> Result<Workflow>;

    /// Create a workflow; the returned workflow carries the assigned id
    async fn create_workflow(&self, request: &CreateWorkflowRequest) -> Result<Workflow>;

    async fn activate_workflow(&self, id: &str) -> Result<()>;

    /// Replace a workflow's tags with the given tag names, creating missing tags
    async fn update_workflow_tags(&self, id: &str, tag_names: &[String]) -> Result<()>;
}
