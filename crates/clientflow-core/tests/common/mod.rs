#![allow(dead_code)]

use clientflow_core::config::{ClientFlowConfig, FolderConfig, RemoteConfig};
use clientflow_core::ClientFlow;
use serde_json::{Value, json};
use wiremock::MockServer;

pub const API_KEY: &str = "test-key";

pub fn config(server: &MockServer, mirror_tags: bool) -> ClientFlowConfig {
    ClientFlowConfig {
        remote: RemoteConfig {
            base_url: server.uri(),
            api_key: API_KEY.to_string(),
            timeout_secs: 1,
        },
        folders: FolderConfig { mirror_tags },
    }
}

pub async fn setup(mirror_tags: bool) -> (MockServer, ClientFlow) {
    let server = MockServer::start().await;
    let core = ClientFlow::new(&config(&server, mirror_tags)).expect("client should build");
    (server, core)
}

pub fn workflow_json(id: &str, name: &str, archived: bool) -> Value {
    json!({
        "id": id,
        "name": name,
        "active": !archived,
        "archived": archived,
        "nodes": [{"type": "n8n-nodes-base.manualTrigger", "name": "Start", "parameters": {}}],
        "connections": {},
        "settings": {}
    })
}

pub fn pet_clinic_template() -> Value {
    json!({
        "id": "tpl",
        "name": "PET CLINIC TEMPLATE",
        "versionId": "v-1",
        "nodes": [
            {
                "id": "n1",
                "name": "Booking Webhook",
                "type": "webhook",
                "typeVersion": 2,
                "position": [250, 300],
                "parameters": {"path": "/{{CLIENT_SLUG}}-book"}
            }
        ],
        "connections": {},
        "settings": {"executionOrder": "v1"}
    })
}
