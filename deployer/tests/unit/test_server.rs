//! HTTP route tests

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use marathon_deployer::server::handlers::{DeployResponse, ErrorResponse, StatusResponse, StatusesResponse};
use marathon_deployer::server::serve::router;
use marathon_deployer::server::state::ServerState;
use marathon_deployer::models::status::DeploymentState;
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use crate::common::{create_test_deployer, create_test_request, create_test_task, FakeOrchestrator};

fn create_test_router(orchestrator: Arc<FakeOrchestrator>) -> Router {
    let deployer = Arc::new(create_test_deployer(orchestrator));
    router(Arc::new(ServerState::new(deployer)))
}

async fn read_json<T: DeserializeOwned>(body: Body) -> T {
    let bytes = to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let app = create_test_router(Arc::new(FakeOrchestrator::new()));

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_deploy_then_status() {
    let orchestrator = Arc::new(FakeOrchestrator::new());
    let app = create_test_router(orchestrator.clone());

    let body = serde_json::to_vec(&create_test_request("ticktock", "log", 2)).unwrap();
    let response = app
        .clone()
        .oneshot(
            Request::post("/deployments")
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let deployed: DeployResponse = read_json(response.into_body()).await;
    assert_eq!(deployed.app_id, "ticktock-log");

    orchestrator.set_running("ticktock-log", vec![create_test_task("ticktock-log.1", "agent-1")]);

    let response = app
        .oneshot(Request::get("/deployments/ticktock/log").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let status: StatusResponse = read_json(response.into_body()).await;
    assert_eq!(status.state, DeploymentState::Incomplete);
    assert_eq!(status.desired, 2);
    assert_eq!(status.up, 1);
    assert_eq!(status.down, 1);
    assert_eq!(status.instances[0].attributes.get("host").map(String::as_str), Some("agent-1"));
}

#[tokio::test]
async fn test_status_all() {
    let orchestrator = Arc::new(FakeOrchestrator::new());
    let app = create_test_router(orchestrator.clone());
    let deployer = create_test_deployer(orchestrator);
    deployer
        .deploy(&create_test_request("ticktock", "log", 1))
        .await
        .unwrap();

    let response = app
        .oneshot(Request::get("/deployments").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let statuses: StatusesResponse = read_json(response.into_body()).await;
    assert_eq!(statuses.total, 1);
    assert_eq!(statuses.deployments[0].label, "log");
}

#[tokio::test]
async fn test_error_status_mapping() {
    let orchestrator = Arc::new(FakeOrchestrator::new());
    let app = create_test_router(orchestrator.clone());

    let response = app
        .clone()
        .oneshot(Request::delete("/deployments/missing/module").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ErrorResponse = read_json(response.into_body()).await;
    assert_eq!(error.error, "not_found");

    let mut request = create_test_request("ticktock", "log", 1);
    request
        .deployment_properties
        .insert("marathon.memory".to_string(), "plenty".to_string());
    let response = app
        .clone()
        .oneshot(
            Request::post("/deployments")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&request).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    orchestrator.go_down();
    let response = app
        .oneshot(Request::get("/deployments").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_malformed_deploy_body() {
    let orchestrator = Arc::new(FakeOrchestrator::new());
    let app = create_test_router(orchestrator.clone());

    let bodies = [
        r#"{"group":"ticktock","label":"log","coordinates":"docker:log","count":-1}"#,
        r#"{"group":"ticktock""#,
        r#"{"label":"log"}"#,
    ];
    for body in bodies {
        let response = app
            .clone()
            .oneshot(
                Request::post("/deployments")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", body);
        let error: ErrorResponse = read_json(response.into_body()).await;
        assert_eq!(error.error, "invalid_argument");
    }

    let response = app
        .oneshot(
            Request::post("/deployments")
                .body(Body::from(r#"{"group":"ticktock","label":"log"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(orchestrator.app("ticktock-log").is_none());
}
