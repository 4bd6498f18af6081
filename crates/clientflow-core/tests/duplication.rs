mod common;

use clientflow_core::services::organizer;
use clientflow_core::{ClientData, DuplicateOptions, DuplicationStage, ErrorKind};
use common::{API_KEY, pet_clinic_template, setup};
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_template(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v1/workflows/tpl"))
        .and(header("X-N8N-API-KEY", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(pet_clinic_template()))
        .mount(server)
        .await;
}

async fn mount_activation(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path_regex(r"^/api/v1/workflows/[^/]+/activate$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"active": true})))
        .mount(server)
        .await;
}

async fn create_body(server: &MockServer) -> Value {
    let requests = server.received_requests().await.expect("recording enabled");
    let create = requests
        .iter()
        .find(|r| r.method.as_str() == "POST" && r.url.path() == "/api/v1/workflows")
        .expect("create request sent");
    serde_json::from_slice(&create.body).expect("create body is JSON")
}

#[tokio::test]
async fn test_pet_clinic_end_to_end() {
    let (server, core) = setup(false).await;
    mount_template(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/workflows"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "new-1",
            "name": "PET CLINIC TEMPLATE - Acme Vets",
            "active": false
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/workflows/new-1/activate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "new-1", "active": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = ClientData::new("Acme Vets").with_custom_field("{{CLIENT_SLUG}}", "acme-vets");
    let result = organizer::onboard_client(&core, "tpl", &client, &DuplicateOptions::default()).await;

    assert!(result.success, "{result:?}");
    assert!(result.activated);
    assert_eq!(result.new_workflow_id.as_deref(), Some("new-1"));
    assert_eq!(
        result.workflow_name.as_deref(),
        Some("PET CLINIC TEMPLATE - Acme Vets")
    );

    let body = create_body(&server).await;
    assert_eq!(body["name"], json!("PET CLINIC TEMPLATE - Acme Vets"));
    assert_eq!(body["nodes"][0]["parameters"]["path"], json!("/acme-vets-book"));
    assert_eq!(body["nodes"][0]["type"], json!("webhook"));
    assert_eq!(body["nodes"][0]["typeVersion"], json!(2));
    assert_eq!(body["settings"], json!({"executionOrder": "v1"}));
    assert!(body.get("id").is_none());
    assert!(body.get("versionId").is_none());

    assert_eq!(
        core.folders.folder_of("new-1").as_deref(),
        Some("Clients/Pet Clinic Clients")
    );
}

#[tokio::test]
async fn test_batch_continues_past_failed_create() {
    let (server, core) = setup(false).await;
    mount_template(&server).await;
    mount_activation(&server).await;

    let clients = ["Downtown Veterinary", "Westside Animal Hospital", "Happy Paws Clinic"];
    for (i, name) in clients.iter().enumerate() {
        let workflow_name = format!("PET CLINIC TEMPLATE - {name}");
        let response = if i == 1 {
            ResponseTemplate::new(500).set_body_json(json!({"message": "internal error"}))
        } else {
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": format!("new-{i}"), "name": workflow_name}))
        };
        Mock::given(method("POST"))
            .and(path("/api/v1/workflows"))
            .and(body_partial_json(json!({"name": workflow_name})))
            .respond_with(response)
            .expect(1)
            .mount(&server)
            .await;
    }

    let clients: Vec<ClientData> = clients.iter().map(|n| ClientData::new(*n)).collect();
    let results = core
        .duplicator
        .duplicate_batch("tpl", &clients, &DuplicateOptions::default())
        .await;

    assert_eq!(results.len(), 3);
    assert_eq!(results.iter().filter(|r| !r.success).count(), 1);
    assert!(results[0].success);
    assert!(results[2].success);
    assert_eq!(results[0].new_workflow_id.as_deref(), Some("new-0"));
    assert_eq!(results[2].new_workflow_id.as_deref(), Some("new-2"));

    let failure = results[1].failure.as_ref().expect("failure recorded");
    assert_eq!(failure.stage, DuplicationStage::Create);
    assert_eq!(failure.kind, ErrorKind::RemoteUnavailable);
}

#[tokio::test]
async fn test_missing_template_reports_not_found() {
    let (server, core) = setup(false).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/workflows/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/workflows"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = core
        .duplicator
        .duplicate("nope", &ClientData::new("Acme"), &DuplicateOptions::default())
        .await;

    assert!(!result.success);
    let failure = result.failure.expect("failure recorded");
    assert_eq!(failure.stage, DuplicationStage::Fetch);
    assert_eq!(failure.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_activation_failure_keeps_created_workflow() {
    let (server, core) = setup(false).await;
    mount_template(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/workflows"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "new-9", "name": "PET CLINIC TEMPLATE - Acme"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/workflows/new-9/activate"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"message": "Workflow has no node to start the workflow"})),
        )
        .mount(&server)
        .await;

    let result = core
        .duplicator
        .duplicate("tpl", &ClientData::new("Acme"), &DuplicateOptions::default())
        .await;

    assert!(!result.success);
    assert!(result.is_partial());
    assert_eq!(result.new_workflow_id.as_deref(), Some("new-9"));
    assert_eq!(result.failed_stage(), Some(DuplicationStage::Activate));
    assert!(
        result
            .error
            .as_deref()
            .is_some_and(|e| e.contains("no node to start"))
    );
}

#[tokio::test]
async fn test_no_activation_when_disabled() {
    let (server, core) = setup(false).await;
    mount_template(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/workflows"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "new-3", "name": "PET CLINIC TEMPLATE - Downtown"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path_regex(r"/activate$"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let options = DuplicateOptions::default()
        .without_activation()
        .with_name_suffix("Downtown");
    let result = core
        .duplicator
        .duplicate("tpl", &ClientData::new("Acme"), &options)
        .await;

    assert!(result.success);
    assert!(!result.activated);
    assert_eq!(
        result.workflow_name.as_deref(),
        Some("PET CLINIC TEMPLATE - Downtown")
    );
}
