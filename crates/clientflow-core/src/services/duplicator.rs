use crate::error::CoreError;
use crate::models::{
    ClientData, CreateWorkflowRequest, DuplicateOptions, DuplicationResult, DuplicationStage,
    Node, Workflow,
};
use crate::remote::WorkflowApi;
use crate::template::{SubstitutionMap, substitute};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Clones template workflows into personalized per-client workflows
#[derive(Clone)]
pub struct WorkflowDuplicator {
    api: Arc<dyn WorkflowApi>,
}

impl WorkflowDuplicator {
    pub fn new(api: Arc<dyn WorkflowApi>) -> Self {
        Self { api }
    }

    /// Duplicate a template for one client.
    ///
    /// Never returns an error: every failure is captured in the result with
    /// the stage that failed. A failed activation leaves the created workflow
    /// in place.
    pub async fn duplicate(
        &self,
        template_id: &str,
        client: &ClientData,
        options: &DuplicateOptions,
    ) -> DuplicationResult {
        let fail = |stage: DuplicationStage, err: &CoreError| {
            error!(template_id, client = %client.name, ?stage, error = %err, "Duplication failed");
            DuplicationResult::failed(template_id, &client.name, stage, err)
        };

        if let Err(e) = client.validate() {
            return fail(DuplicationStage::Validate, &e);
        }

        info!(template_id, client = %client.name, "Duplicating workflow");

        let template = match self.api.get_workflow(template_id).await {
            Ok(template) => template,
            Err(e) => return fail(DuplicationStage::Fetch, &e),
        };

        let request = personalize(&template, client, options);

        let created = match self.api.create_workflow(&request).await {
            Ok(created) => created,
            Err(e) => return fail(DuplicationStage::Create, &e),
        };
        let new_id = created.id_str().to_string();
        let workflow_name = if created.name.is_empty() {
            request.name.clone()
        } else {
            created.name.clone()
        };
        info!(workflow_id = %new_id, name = %workflow_name, "Created workflow");

        if options.activate {
            if let Err(e) = self.api.activate_workflow(&new_id).await {
                warn!(
                    workflow_id = %new_id,
                    error = %e,
                    "Workflow created but activation failed"
                );
                let mut result =
                    DuplicationResult::failed(template_id, &client.name, DuplicationStage::Activate, &e);
                result.new_workflow_id = Some(new_id);
                result.workflow_name = Some(workflow_name);
                return result;
            }
            info!(workflow_id = %new_id, "Activated workflow");
        }

        DuplicationResult::created(
            template_id,
            &client.name,
            new_id,
            workflow_name,
            options.activate,
        )
    }

    /// Duplicate a template for each client in order; a failure never stops the batch
    pub async fn duplicate_batch(
        &self,
        template_id: &str,
        clients: &[ClientData],
        options: &DuplicateOptions,
    ) -> Vec<DuplicationResult> {
        let mut results = Vec::with_capacity(clients.len());
        for client in clients {
            results.push(self.duplicate(template_id, client, options).await);
        }

        let succeeded = results.iter().filter(|r| r.success).count();
        info!(
            template_id,
            succeeded,
            failed = results.len() - succeeded,
            "Batch duplication finished"
        );
        results
    }
}

/// Build the creation payload for a client copy of `template`.
///
/// Only node `parameters` are substituted; the name becomes
/// `"<template name> - <suffix>"`.
pub fn personalize(
    template: &Workflow,
    client: &ClientData,
    options: &DuplicateOptions,
) -> CreateWorkflowRequest {
    let suffix = options
        .name_suffix
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(&client.name);
    let name = format!("{} - {}", template.name, suffix);

    let substitutions = client.substitution_map();
    let mut request = template.to_create_request(name);
    request.nodes = request
        .nodes
        .iter()
        .map(|node| personalize_node(node, &substitutions))
        .collect();
    request
}

fn personalize_node(node: &Node, substitutions: &SubstitutionMap) -> Node {
    let mut personalized = node.clone();
    personalized.parameters = substitute(&node.parameters, substitutions);
    personalized
}
