use super::WorkflowApi;
use crate::config::RemoteConfig;
use crate::error::{CoreError, Result};
use crate::models::{CreateWorkflowRequest, Tag, TagList, Workflow, WorkflowList};
use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, warn};

const API_KEY_HEADER: &str = "X-N8N-API-KEY";
const PAGE_LIMIT: &str = "250";
const TAG_PAGE_LIMIT: &str = "100";

/// Client for the n8n public REST API (`/api/v1`)
///
/// The tag catalog is fetched once and cached; clones share the cache.
#[derive(Debug, Clone)]
pub struct N8nClient {
    http_client: Client,
    api_root: String,
    api_key: String,
    tag_cache: Arc<Mutex<Option<Vec<Tag>>>>,
}

impl N8nClient {
    /// Build a client with the configured per-request timeout
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        config.validate()?;
        let http_client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| CoreError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self::with_client(http_client, config))
    }

    /// Use a caller-provided `reqwest::Client`
    pub fn with_client(client: Client, config: &RemoteConfig) -> Self {
        Self {
            http_client: client,
            api_root: config.api_root(),
            api_key: config.api_key.clone(),
            tag_cache: Arc::new(Mutex::new(None)),
        }
    }

    /// API URL with each segment percent-encoded, so ids cannot change the target
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let invalid = || CoreError::Config(format!("Invalid base URL: {}", self.api_root));
        let mut url = Url::parse(&self.api_root).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Drop the cached tag catalog; the next tag update re-fetches it
    pub fn clear_tag_cache(&self) {
        *self.tag_cache.lock() = None;
    }

    fn add_auth(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header(API_KEY_HEADER, &self.api_key)
    }

    async fn send(&self, builder: RequestBuilder, what: &str) -> Result<Response> {
        let response = self.add_auth(builder).send().await?;
        check_status(response, what).await
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder, what: &str) -> Result<T> {
        let response = self.send(builder, what).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body)
            .map_err(|e| CoreError::InvalidResponse(format!("{what}: {e}")))
    }

    async fn list_tags(&self) -> Result<Vec<Tag>> {
        let mut tags = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut query = vec![("limit", TAG_PAGE_LIMIT.to_string())];
            if let Some(c) = &cursor {
                query.push(("cursor", c.clone()));
            }
            let builder = self.http_client.get(self.endpoint(&["tags"])?).query(&query);
            let page: TagList = self.send_json(builder, "tags").await?;
            cursor = page.next_cursor().map(str::to_string);
            tags.extend(page.into_tags());
            if cursor.is_none() {
                return Ok(tags);
            }
        }
    }

    async fn create_tag(&self, name: &str) -> Result<Tag> {
        let builder = self
            .http_client
            .post(self.endpoint(&["tags"])?)
            .json(&json!({ "name": name }));
        self.send_json(builder, &format!("tag {name}")).await
    }

    /// Cached tag catalog, fetched on first use
    async fn tag_catalog(&self) -> Result<Vec<Tag>> {
        if let Some(tags) = self.tag_cache.lock().clone() {
            return Ok(tags);
        }
        let tags = self.list_tags().await?;
        debug!(count = tags.len(), "Fetched tag catalog");
        *self.tag_cache.lock() = Some(tags.clone());
        Ok(tags)
    }

    fn cache_tag(&self, tag: Tag) {
        if let Some(tags) = self.tag_cache.lock().as_mut() {
            tags.push(tag);
        }
    }

    /// Create a tag missing from the catalog. A conflict means the cache is
    /// stale, so the catalog is re-fetched and searched again.
    async fn create_missing_tag(&self, name: &str) -> Result<String> {
        debug!(tag = %name, "Creating remote tag");
        match self.create_tag(name).await {
            Ok(tag) => {
                let id = tag.id.clone().ok_or_else(|| {
                    CoreError::InvalidResponse(format!("created tag {name} has no id"))
                })?;
                self.cache_tag(tag);
                Ok(id)
            }
            Err(CoreError::RemoteRejected { status: 409, .. }) => {
                self.clear_tag_cache();
                self.tag_catalog()
                    .await?
                    .into_iter()
                    .find(|t| t.name == name)
                    .and_then(|t| t.id)
                    .ok_or_else(|| CoreError::InvalidResponse(format!("tag {name} conflicts but is not listed")))
            }
            Err(e) => Err(e),
        }
    }

    /// Resolve tag names to ids, creating tags that do not exist yet
    async fn resolve_tag_ids(&self, tag_names: &[String]) -> Result<Vec<String>> {
        let catalog = self.tag_catalog().await?;
        let mut ids = Vec::with_capacity(tag_names.len());

        for name in tag_names {
            let found = catalog
                .iter()
                .find(|t| t.name == *name)
                .and_then(|t| t.id.clone());
            let id = match found {
                Some(id) => id,
                None => self.create_missing_tag(name).await?,
            };
            ids.push(id);
        }

        Ok(ids)
    }
}

#[async_trait]
impl WorkflowApi for N8nClient {
    async fn list_workflows(&self) -> Result<Vec<Workflow>> {
        let mut workflows = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut query = vec![("limit", PAGE_LIMIT.to_string())];
            if let Some(c) = &cursor {
                query.push(("cursor", c.clone()));
            }
            let builder = self.http_client.get(self.endpoint(&["workflows"])?).query(&query);
            let page: WorkflowList = self.send_json(builder, "workflows").await?;
            cursor = page.next_cursor().map(str::to_string);
            workflows.extend(page.into_workflows());
            if cursor.is_none() {
                break;
            }
        }

        debug!(count = workflows.len(), "Fetched workflows");
        Ok(workflows)
    }

    async fn get_workflow(&self, id: &str) -> Result<Workflow> {
        let builder = self.http_client.get(self.endpoint(&["workflows", id])?);
        self.send_json(builder, &format!("workflow {id}")).await
    }

    async fn create_workflow(&self, request: &CreateWorkflowRequest) -> Result<Workflow> {
        let builder = self
            .http_client
            .post(self.endpoint(&["workflows"])?)
            .json(request);
        let created: Workflow = self
            .send_json(builder, &format!("create workflow {}", request.name))
            .await?;
        if created.id.as_deref().is_none_or(str::is_empty) {
            return Err(CoreError::InvalidResponse(format!(
                "created workflow {} has no id",
                request.name
            )));
        }
        Ok(created)
    }

    async fn activate_workflow(&self, id: &str) -> Result<()> {
        let builder = self
            .http_client
            .post(self.endpoint(&["workflows", id, "activate"])?);
        self.send(builder, &format!("workflow {id}")).await?;
        Ok(())
    }

    async fn update_workflow_tags(&self, id: &str, tag_names: &[String]) -> Result<()> {
        let ids = self.resolve_tag_ids(tag_names).await?;
        let body: Vec<Value> = ids.into_iter().map(|id| json!({ "id": id })).collect();
        let builder = self
            .http_client
            .put(self.endpoint(&["workflows", id, "tags"])?)
            .json(&body);
        self.send(builder, &format!("workflow {id}")).await?;
        Ok(())
    }
}

/// Map non-success statuses onto the error taxonomy
async fn check_status(response: Response, what: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body).unwrap_or_else(|| status.to_string());

    if status == StatusCode::NOT_FOUND {
        return Err(CoreError::NotFound(what.to_string()));
    }
    if status.is_server_error() || status == StatusCode::REQUEST_TIMEOUT {
        warn!(status = status.as_u16(), target_resource = %what, "Remote platform error");
        return Err(CoreError::RemoteUnavailable(format!("{what}: {status} {message}")));
    }
    Err(CoreError::RemoteRejected {
        status: status.as_u16(),
        message: format!("{what}: {message}"),
    })
}

fn error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(body) {
        Ok(value) => value
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| Some(body.trim().to_string())),
        Err(_) => Some(body.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_json_message() {
        assert_eq!(
            error_message(r#"{"message":"request/body must have required property 'name'"}"#),
            Some("request/body must have required property 'name'".to_string())
        );
        assert_eq!(error_message("  plain text "), Some("plain text".to_string()));
        assert_eq!(error_message(""), None);
    }

    #[test]
    fn test_new_rejects_missing_credentials() {
        let err = N8nClient::new(&RemoteConfig::new("http://localhost:5678", "")).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn test_endpoints_use_api_root() {
        let client = N8nClient::new(&RemoteConfig::new("http://localhost:5678/", "key")).unwrap();
        assert_eq!(
            client.endpoint(&["workflows", "abc"]).unwrap().as_str(),
            "http://localhost:5678/api/v1/workflows/abc"
        );
    }

    #[test]
    fn test_endpoint_encodes_ids() {
        let client = N8nClient::new(&RemoteConfig::new("http://localhost:5678", "key")).unwrap();
        assert_eq!(
            client
                .endpoint(&["workflows", "a/b?c=1#x", "activate"])
                .unwrap()
                .as_str(),
            "http://localhost:5678/api/v1/workflows/a%2Fb%3Fc=1%23x/activate"
        );
    }
}
