use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};

use greenloop_ai::{CompletionOptions, CompletionProvider, GeneratorSettings, ProviderError, RecommendationGenerator};
use greenloop_api::app::{build_app, services::build_services, AppServices};
use greenloop_infra::config::AppConfig;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(services: AppServices) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = build_app(services);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn heuristic() -> Self {
        Self::spawn(AppServices::in_memory(RecommendationGenerator::heuristic_only())).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Provider returning a fixed completion.
struct CannedProvider(Result<String, ProviderError>);

#[async_trait]
impl CompletionProvider for CannedProvider {
    fn name(&self) -> &str {
        "canned"
    }

    async fn complete(&self, _: &str, _: &str, _: &CompletionOptions) -> Result<String, ProviderError> {
        self.0.clone()
    }
}

fn with_provider(reply: Result<String, ProviderError>) -> AppServices {
    AppServices::in_memory(RecommendationGenerator::with_provider(
        Arc::new(CannedProvider(reply)),
        GeneratorSettings {
            timeout: Duration::from_secs(2),
            ..GeneratorSettings::default()
        },
    ))
}

fn sample_items() -> Value {
    json!([
        { "id": 1, "name": "Laptop A", "category": "Laptops", "weight": 2, "co2_saved": 40 },
        { "id": 2, "name": "Monitor B", "category": "Monitors", "weight": 5, "co2_saved": 100 }
    ])
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::heuristic().await;
    let res = reqwest::get(srv.url("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn asset_lifecycle_create_update_delete() {
    let srv = TestServer::heuristic().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/assets"))
        .json(&json!({ "name": "Laptop", "category": "Laptops", "weight": 2.5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await.unwrap();
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["co2_saved"], json!(50.0));

    let res = client
        .put(srv.url(&format!("/assets/{id}")))
        .json(&json!({ "weight": 3.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await.unwrap();
    assert_eq!(updated["co2_saved"], json!(60.0));
    assert_eq!(updated["name"], "Laptop");

    let listed: Value = client.get(srv.url("/assets")).send().await.unwrap().json().await.unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let res = client.delete(srv.url(&format!("/assets/{id}"))).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["deleted"], json!(id));

    let res = client.get(srv.url(&format!("/assets/{id}"))).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_assets_are_rejected() {
    let srv = TestServer::heuristic().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/assets"))
        .json(&json!({ "name": "Laptop" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");

    let res = client.get(srv.url("/assets/not-a-number")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client.delete(srv.url("/assets/12345")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn analyze_without_provider_uses_heuristic_and_records_history() {
    let srv = TestServer::heuristic().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/assets/analyze"))
        .json(&json!({ "items": sample_items() }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();

    let recs = body["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 3);
    assert_eq!(recs[0]["priority"], "high");
    assert!(recs[0]["description"].as_str().unwrap().starts_with("Monitor B"));
    assert!(recs[1]["title"].as_str().unwrap().contains("Monitors"));
    let id = body["id"].as_i64().unwrap();

    let history: Value = client.get(srv.url("/assets/analysis")).send().await.unwrap().json().await.unwrap();
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["id"], json!(id));
    assert!(history[0]["createdAt"].is_string());
}

#[tokio::test]
async fn analyze_empty_inventory_returns_sentinel_without_id() {
    let srv = TestServer::heuristic().await;
    let client = reqwest::Client::new();

    let body: Value = client
        .post(srv.url("/assets/analyze"))
        .json(&json!({ "items": [] }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["recommendations"].as_array().unwrap().len(), 1);
    assert_eq!(body["recommendations"][0]["priority"], "high");
    assert!(body["id"].is_null());

    let history: Value = client.get(srv.url("/assets/analysis")).send().await.unwrap().json().await.unwrap();
    assert!(history.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn analyze_rejects_non_array_items() {
    let srv = TestServer::heuristic().await;
    let client = reqwest::Client::new();

    for body in [json!({ "items": "laptops" }), json!({}), json!([]), json!(sample_items())] {
        let res = client.post(srv.url("/assets/analyze")).json(&body).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let err: Value = res.json().await.unwrap();
        assert_eq!(err["error"], "invalid_input");
    }

    let res = client
        .post(srv.url("/assets/analyze"))
        .header("content-type", "application/json")
        .body("{ items: ")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let err: Value = res.json().await.unwrap();
    assert_eq!(err["error"], "invalid_input");
}

#[tokio::test]
async fn malformed_provider_answer_is_repaired() {
    let srv = TestServer::spawn(with_provider(Ok(
        "Voici mes conseils :\n[{\"priority\": high, icon: ⚡, 'title': 'x', description: 'y'}]".to_string(),
    )))
    .await;

    let body: Value = reqwest::Client::new()
        .post(srv.url("/assets/analyze"))
        .json(&json!({ "items": sample_items() }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let recs = body["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0]["priority"], "high");
    assert_eq!(recs[0]["title"], "x");
    assert_eq!(recs[0]["description"], "y");
    assert_eq!(recs[0]["icon"], "⚡");
}

#[tokio::test]
async fn provider_failure_falls_back_to_heuristic() {
    let srv = TestServer::spawn(with_provider(Err(ProviderError::Status {
        status: 500,
        body: "boom".into(),
    })))
    .await;

    let res = reqwest::Client::new()
        .post(srv.url("/assets/analyze"))
        .json(&json!({ "items": sample_items() }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 3);
    assert!(body["id"].is_i64());
}

#[tokio::test]
async fn file_backed_services_persist_across_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().to_string_lossy().to_string();
    let config = AppConfig::from_lookup(|key| match key {
        "GREENLOOP_DATA_DIR" => Some(data_dir.clone()),
        _ => None,
    });
    let client = reqwest::Client::new();

    {
        let srv = TestServer::spawn(build_services(&config).unwrap()).await;
        let res = client
            .post(srv.url("/assets"))
            .json(&json!({ "name": "Phone", "category": "Phones", "weight": 0.2 }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        client
            .post(srv.url("/assets/analyze"))
            .json(&json!({ "items": sample_items() }))
            .send()
            .await
            .unwrap();
    }

    let srv = TestServer::spawn(build_services(&config).unwrap()).await;
    let assets: Value = client.get(srv.url("/assets")).send().await.unwrap().json().await.unwrap();
    assert_eq!(assets[0]["name"], "Phone");
    let history: Value = client.get(srv.url("/assets/analysis")).send().await.unwrap().json().await.unwrap();
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert!(config.assets_path().exists());
}
