//! Deployer tests against an in-memory orchestrator

use std::sync::Arc;

use marathon_deployer::errors::DeployerError;
use marathon_deployer::models::deployment::DeploymentId;
use marathon_deployer::models::status::{DeploymentState, InstanceState};
use marathon_models::App;

use crate::common::{
    create_test_deployer, create_test_request, create_test_task, FakeOrchestrator,
};

#[tokio::test]
async fn test_deploy_creates_app() {
    let orchestrator = Arc::new(FakeOrchestrator::new());
    let deployer = create_test_deployer(orchestrator.clone());

    let id = deployer
        .deploy(&create_test_request("ticktock", "log", 2))
        .await
        .unwrap();

    assert_eq!(id, DeploymentId::new("ticktock", "log"));
    let app = orchestrator.app("ticktock-log").unwrap();
    assert_eq!(app.instances, 2);
}

#[tokio::test]
async fn test_status_after_deploy() {
    let orchestrator = Arc::new(FakeOrchestrator::new());
    let deployer = create_test_deployer(orchestrator.clone());
    let id = deployer
        .deploy(&create_test_request("ticktock", "log", 3))
        .await
        .unwrap();

    // Nothing scheduled yet
    let status = deployer.status(&id).await.unwrap();
    assert_eq!(status.instances().len(), 3);
    assert_eq!(status.state(), DeploymentState::Failed);

    orchestrator.set_running(
        "ticktock-log",
        vec![
            create_test_task("ticktock-log.1", "agent-1"),
            create_test_task("ticktock-log.2", "agent-2"),
        ],
    );

    let status = deployer.status(&id).await.unwrap();
    let states: Vec<InstanceState> = status.instances().iter().map(|s| s.state()).collect();
    assert_eq!(states, vec![InstanceState::Up, InstanceState::Up, InstanceState::Down]);
    assert_eq!(status.state(), DeploymentState::Incomplete);
    assert_eq!(
        status.instances()[1].instance().map(|i| i.host.as_str()),
        Some("agent-2")
    );
}

#[tokio::test]
async fn test_status_unknown_deployment() {
    let orchestrator = Arc::new(FakeOrchestrator::new());
    let deployer = create_test_deployer(orchestrator);

    let result = deployer.status(&DeploymentId::new("missing", "module")).await;
    assert!(matches!(result, Err(DeployerError::NotFound(_))));
}

#[tokio::test]
async fn test_undeploy() {
    let orchestrator = Arc::new(FakeOrchestrator::new());
    let deployer = create_test_deployer(orchestrator.clone());
    let id = deployer
        .deploy(&create_test_request("ticktock", "log", 1))
        .await
        .unwrap();

    deployer.undeploy(&id).await.unwrap();
    assert!(orchestrator.app("ticktock-log").is_none());

    let result = deployer.undeploy(&id).await;
    assert!(matches!(result, Err(DeployerError::NotFound(_))));
}

#[tokio::test]
async fn test_status_all_ignores_foreign_apps() {
    let orchestrator = Arc::new(FakeOrchestrator::new());
    let deployer = create_test_deployer(orchestrator.clone());
    deployer
        .deploy(&create_test_request("ticktock", "time", 1))
        .await
        .unwrap();
    deployer
        .deploy(&create_test_request("ticktock", "log", 1))
        .await
        .unwrap();
    orchestrator.insert(App {
        id: "/jenkins".to_string(),
        instances: 1,
        ..Default::default()
    });
    orchestrator.set_running("ticktock-time", vec![create_test_task("ticktock-time.1", "agent-1")]);

    let statuses = deployer.status_all().await.unwrap();

    assert_eq!(statuses.len(), 2);
    assert_eq!(
        statuses[&DeploymentId::new("ticktock", "time")].state(),
        DeploymentState::Deployed
    );
    assert_eq!(
        statuses[&DeploymentId::new("ticktock", "log")].state(),
        DeploymentState::Failed
    );
}

#[tokio::test]
async fn test_orchestrator_failures_propagate() {
    let orchestrator = Arc::new(FakeOrchestrator::new());
    let deployer = create_test_deployer(orchestrator.clone());
    orchestrator.go_down();

    let err = deployer
        .deploy(&create_test_request("ticktock", "log", 1))
        .await
        .unwrap_err();
    assert!(err.is_transport());

    let err = deployer.status_all().await.unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_invalid_request_makes_no_call() {
    let orchestrator = Arc::new(FakeOrchestrator::new());
    let deployer = create_test_deployer(orchestrator.clone());
    let mut request = create_test_request("ticktock", "log", 1);
    request
        .deployment_properties
        .insert("marathon.cpu".to_string(), "half".to_string());

    let result = deployer.deploy(&request).await;
    assert!(matches!(result, Err(DeployerError::InvalidArgument(_))));
    assert!(orchestrator.app("ticktock-log").is_none());
}

#[tokio::test]
async fn test_colliding_app_id_is_not_claimed() {
    let orchestrator = Arc::new(FakeOrchestrator::new());
    let deployer = create_test_deployer(orchestrator.clone());
    deployer
        .deploy(&create_test_request("a-b", "c", 1))
        .await
        .unwrap();

    // Same app id "a-b-c", different deployment
    let other = DeploymentId::new("a", "b-c");
    assert!(matches!(
        deployer.status(&other).await,
        Err(DeployerError::NotFound(_))
    ));
    assert!(matches!(
        deployer.undeploy(&other).await,
        Err(DeployerError::NotFound(_))
    ));
    assert!(orchestrator.app("a-b-c").is_some());

    deployer.undeploy(&DeploymentId::new("a-b", "c")).await.unwrap();
    assert!(orchestrator.app("a-b-c").is_none());
}

#[tokio::test]
async fn test_unlabelled_app_is_not_a_deployment() {
    let orchestrator = Arc::new(FakeOrchestrator::new());
    let deployer = create_test_deployer(orchestrator.clone());
    orchestrator.insert(App {
        id: "ticktock-log".to_string(),
        instances: 1,
        ..Default::default()
    });

    let id = DeploymentId::new("ticktock", "log");
    assert!(matches!(deployer.status(&id).await, Err(DeployerError::NotFound(_))));
    assert!(matches!(deployer.undeploy(&id).await, Err(DeployerError::NotFound(_))));
    assert!(orchestrator.app("ticktock-log").is_some());
}
