//! HTTP surface tests over the real router with an in-memory store and
//! a scripted content generator.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use common::mocks::MockGenerator;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use verity::api::routes::create_router;
use verity::db::ProjectStore;
use verity::sources::SourceDirectory;
use verity::types::{
    FinalReport, InterventionResponse, ProjectDetail, ProjectStatus, StartResearchResponse,
    StatusSnapshot,
};
use verity::utils::config::{Config, DatabaseConfig, LlmConfig, ServerConfig, WorkflowConfig};
use verity::workflow::{WorkflowOrchestrator, WorkflowQueue};
use verity::AppState;

fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            path: ":memory:".to_string(),
        },
        llm: LlmConfig {
            provider: "ollama".to_string(),
            openai_api_key: None,
            openai_api_base: "https://api.openai.com/v1".to_string(),
            openai_model: "gpt-4o".to_string(),
            ollama_url: "http://localhost:11434".to_string(),
            ollama_model: "llama3.2".to_string(),
        },
        workflow: WorkflowConfig {
            analyst_count: 2,
            // Zero-length review window keeps API tests fast; the gate
            // path itself is covered by the workflow tests.
            review_timeout_secs: 0,
            review_poll_secs: 0,
            queue_workers: 2,
            queue_capacity: 8,
        },
    }
}

async fn test_server(generator: MockGenerator) -> (TestServer, Arc<ProjectStore>) {
    let store = Arc::new(ProjectStore::new_memory().await.unwrap());
    let sources = Arc::new(SourceDirectory::new(Arc::clone(&store)));
    sources.initialize_default_sources().await.unwrap();

    let config = test_config();
    let orchestrator = Arc::new(WorkflowOrchestrator::new(
        Arc::clone(&store),
        Arc::new(generator),
        config.workflow.clone(),
    ));
    let queue = Arc::new(WorkflowQueue::start(
        orchestrator,
        config.workflow.queue_workers,
        config.workflow.queue_capacity,
    ));

    let state = AppState {
        config: Arc::new(config),
        store: Arc::clone(&store),
        queue,
        sources,
    };

    let server = TestServer::new(create_router().with_state(state)).unwrap();
    (server, store)
}

async fn wait_for_status(store: &ProjectStore, project_id: &str, status: ProjectStatus) {
    for _ in 0..500 {
        let project = store.get_project(project_id).await.unwrap().unwrap();
        if project.status == status {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("project never reached {:?}", status);
}

#[tokio::test]
async fn test_start_research_runs_to_completion() {
    let (server, store) = test_server(MockGenerator::new(2, 2)).await;

    let response = server
        .post("/api/research")
        .json(&json!({ "topic": "solar panel subsidies" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let started: StartResearchResponse = response.json();
    assert_eq!(started.status, ProjectStatus::Created);

    wait_for_status(&store, &started.project_id, ProjectStatus::Completed).await;

    let detail: ProjectDetail = server
        .get(&format!("/api/projects/{}", started.project_id))
        .await
        .json();
    assert_eq!(detail.analysts.len(), 2);
    assert_eq!(detail.interviews.len(), 4);
    assert_eq!(detail.project.topic, "solar panel subsidies");

    let snapshot: StatusSnapshot = server
        .get(&format!("/api/projects/{}/status", started.project_id))
        .await
        .json();
    assert_eq!(snapshot.status, ProjectStatus::Completed);
    assert_eq!(snapshot.progress, 100.0);

    let report: FinalReport = server
        .get(&format!("/api/projects/{}/report", started.project_id))
        .await
        .json();
    assert!((report.credibility_score - 0.9).abs() < 1e-9);
}

#[tokio::test]
async fn test_start_research_rejects_empty_topic() {
    let (server, _) = test_server(MockGenerator::new(1, 1)).await;

    let response = server
        .post("/api/research")
        .json(&json!({ "topic": "   " }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_report_not_available_until_completed() {
    let (server, store) = test_server(MockGenerator::new(1, 1)).await;
    let project = store.create_project("pending topic").await.unwrap();

    let response = server
        .get(&format!("/api/projects/{}/report", project.id))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_project_returns_404() {
    let (server, _) = test_server(MockGenerator::new(1, 1)).await;

    let response = server.get("/api/projects/nope/status").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = server.get("/api/projects/nope").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_intervention_rejected_outside_review() {
    let (server, store) = test_server(MockGenerator::new(1, 1)).await;
    let project = store.create_project("fresh topic").await.unwrap();

    let response = server
        .post(&format!("/api/projects/{}/intervene", project.id))
        .json(&json!({ "action": "approve" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    // Status untouched by the rejected request.
    let fetched = store.get_project(&project.id).await.unwrap().unwrap();
    assert_eq!(fetched.status, ProjectStatus::Created);
}

#[tokio::test]
async fn test_stop_intervention_terminates_project() {
    let (server, store) = test_server(MockGenerator::new(1, 1)).await;
    let project = store.create_project("reviewed topic").await.unwrap();
    store
        .update_project_status(&project.id, ProjectStatus::Reviewing)
        .await
        .unwrap();

    let response = server
        .post(&format!("/api/projects/{}/intervene", project.id))
        .json(&json!({ "action": "stop", "notes": "coverage is sufficient" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let outcome: InterventionResponse = response.json();
    assert_eq!(outcome.status, ProjectStatus::Stopped);

    let fetched = store.get_project(&project.id).await.unwrap().unwrap();
    assert_eq!(fetched.status, ProjectStatus::Stopped);
    assert_eq!(fetched.human_notes.as_deref(), Some("coverage is sufficient"));
}

#[tokio::test]
async fn test_modify_records_notes_without_advancing() {
    let (server, store) = test_server(MockGenerator::new(1, 1)).await;
    let project = store.create_project("reviewed topic").await.unwrap();
    store
        .update_project_status(&project.id, ProjectStatus::Reviewing)
        .await
        .unwrap();

    let response = server
        .post(&format!("/api/projects/{}/intervene", project.id))
        .json(&json!({ "action": "modify", "notes": "dig into the funding angle" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let outcome: InterventionResponse = response.json();
    assert_eq!(outcome.status, ProjectStatus::Reviewing);

    let fetched = store.get_project(&project.id).await.unwrap().unwrap();
    assert_eq!(
        fetched.human_notes.as_deref(),
        Some("dig into the funding angle")
    );
}

#[tokio::test]
async fn test_approve_intervention_marks_completed() {
    let (server, store) = test_server(MockGenerator::new(1, 1)).await;
    let project = store.create_project("reviewed topic").await.unwrap();
    store
        .update_project_status(&project.id, ProjectStatus::Reviewing)
        .await
        .unwrap();

    let response = server
        .post(&format!("/api/projects/{}/intervene", project.id))
        .json(&json!({ "action": "approve" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let outcome: InterventionResponse = response.json();
    assert_eq!(outcome.status, ProjectStatus::Completed);
}

#[tokio::test]
async fn test_delete_project() {
    let (server, store) = test_server(MockGenerator::new(1, 1)).await;
    let project = store.create_project("disposable topic").await.unwrap();

    let response = server
        .delete(&format!("/api/projects/{}", project.id))
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = server.get(&format!("/api/projects/{}", project.id)).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sources_listing_is_seeded_and_sorted() {
    let (server, _) = test_server(MockGenerator::new(1, 1)).await;

    let response = server.get("/api/sources").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let sources: Vec<verity::types::NewsSource> = response.json();
    assert_eq!(sources.len(), 10);
    assert!(sources
        .windows(2)
        .all(|pair| pair[0].credibility_rating >= pair[1].credibility_rating));
    assert_eq!(sources[0].name, "FactCheck.org");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let (server, _) = test_server(MockGenerator::new(1, 1)).await;

    let response = server.get("/api-docs/openapi.json").await;
    assert_eq!(response.status_code(), StatusCode::OK);
}
