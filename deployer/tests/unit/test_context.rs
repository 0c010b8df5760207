//! Application wiring tests

use std::sync::Arc;

use marathon_deployer::app::context::AppContext;
use marathon_deployer::errors::DeployerError;
use marathon_deployer::resource::Resource;

use crate::common::{create_test_request, create_test_settings, FakeOrchestrator};

#[test]
fn test_context_loads() {
    let context = AppContext::build(create_test_settings()).unwrap();

    assert!(Arc::ptr_eq(&context.process_deployer, &context.task_deployer));
    assert!(context.resource_loader.contains("docker"));
    assert_eq!(
        context.resource_loader.resolve("docker:springcloud/log-sink").unwrap(),
        Resource::Docker {
            image: "springcloud/log-sink".to_string()
        }
    );
    assert_eq!(context.settings.marathon.api_endpoint, "http://marathon.mesos:8080");
}

#[test]
fn test_context_rejects_bad_endpoint() {
    let mut settings = create_test_settings();
    settings.marathon.api_endpoint = "marathon without scheme".to_string();

    assert!(matches!(
        AppContext::build(settings),
        Err(DeployerError::UrlError(_))
    ));
}

#[tokio::test]
async fn test_context_deployers_share_orchestrator() {
    let orchestrator = Arc::new(FakeOrchestrator::new());
    let context = AppContext::with_orchestrator(create_test_settings(), orchestrator.clone());

    let id = context
        .process_deployer
        .deploy(&create_test_request("ticktock", "log", 1))
        .await
        .unwrap();
    assert!(orchestrator.app("ticktock-log").is_some());

    context.task_deployer.undeploy(&id).await.unwrap();
    assert!(orchestrator.app("ticktock-log").is_none());
}
