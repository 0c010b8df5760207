//! Orchestrator abstraction
//!
//! The deployer only ever talks to the cluster scheduler through this trait,
//! so the scheduler handle is constructed once and passed in explicitly.

use std::collections::BTreeMap;

use async_trait::async_trait;
use marathon_models::App;

use crate::errors::DeployerError;
use crate::models::deployment::DeploymentId;
use crate::models::status::InstanceRecord;

/// Cluster scheduler operations used by the deployer
#[async_trait]
pub trait Orchestrator: Send + Sync {
    /// Create an app
    async fn create_app(&self, app: &App) -> Result<(), DeployerError>;

    /// Delete an app, `NotFound` if it does not exist
    async fn delete_app(&self, app_id: &str) -> Result<(), DeployerError>;

    /// Get an app with its running instances, `NotFound` if it does not exist
    async fn get_app(&self, app_id: &str) -> Result<AppSnapshot, DeployerError>;

    /// List every app with its running instances
    async fn list_apps(&self) -> Result<Vec<AppSnapshot>, DeployerError>;
}

/// Point in time view of an app as reported by the orchestrator
#[derive(Debug, Clone, PartialEq)]
pub struct AppSnapshot {
    pub app_id: String,

    /// Requested number of instances
    pub instances: i64,

    pub labels: BTreeMap<String, String>,

    /// Currently running instances
    pub tasks: Vec<InstanceRecord>,
}

impl AppSnapshot {
    /// Deployment the app belongs to, if it carries the deployment labels
    pub fn deployment_id(&self) -> Option<DeploymentId> {
        DeploymentId::from_labels(&self.labels)
    }
}

impl From<App> for AppSnapshot {
    fn from(app: App) -> Self {
        let tasks = app
            .tasks
            .unwrap_or_default()
            .into_iter()
            .map(|task| InstanceRecord {
                id: task.id,
                host: task.host,
                ports: task.ports,
                started_at: task.started_at,
            })
            .collect();

        Self {
            app_id: app.id,
            instances: app.instances,
            labels: app.labels,
            tasks,
        }
    }
}
