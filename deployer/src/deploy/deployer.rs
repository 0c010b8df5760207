//! Module deployer backed by an orchestrator

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::deploy::app_builder::AppBuilder;
use crate::deploy::reconciler::{group_statuses, reconcile};
use crate::errors::DeployerError;
use crate::models::deployment::{DeploymentId, DeploymentRequest};
use crate::models::status::DeploymentStatus;
use crate::orchestrator::{AppSnapshot, Orchestrator};
use crate::resource::DelegatingResourceLoader;
use crate::settings::Settings;

/// Deploys modules as orchestrator apps and reports their status
///
/// Every operation is a single orchestrator call; failures are returned to
/// the caller as is.
pub struct AppDeployer {
    orchestrator: Arc<dyn Orchestrator>,
    settings: Arc<Settings>,
    resources: Arc<DelegatingResourceLoader>,
}

impl AppDeployer {
    pub fn new(
        orchestrator: Arc<dyn Orchestrator>,
        settings: Arc<Settings>,
        resources: Arc<DelegatingResourceLoader>,
    ) -> Self {
        Self {
            orchestrator,
            settings,
            resources,
        }
    }

    /// Deploy a module
    pub async fn deploy(&self, request: &DeploymentRequest) -> Result<DeploymentId, DeployerError> {
        let app = AppBuilder::new(&self.settings, &self.resources).build(request)?;

        info!("Creating app with definition: {:?}", app);
        self.orchestrator.create_app(&app).await?;

        Ok(request.deployment_id())
    }

    /// Remove a deployed module
    pub async fn undeploy(&self, id: &DeploymentId) -> Result<(), DeployerError> {
        let app = self.owned_app(id).await?;
        info!("Deleting app {} for {}", app.app_id, id);
        self.orchestrator.delete_app(&app.app_id).await
    }

    /// Status of one deployed module
    pub async fn status(&self, id: &DeploymentId) -> Result<DeploymentStatus, DeployerError> {
        let app = self.owned_app(id).await?;
        debug!(
            "App {} requests {} instances, {} running",
            app.app_id,
            app.instances,
            app.tasks.len()
        );
        reconcile(id.clone(), app.instances, app.tasks)
    }

    /// The app backing `id`
    ///
    /// App ids are ambiguous when group or label contain `-`, so the
    /// deployment labels must name `id` as well.
    async fn owned_app(&self, id: &DeploymentId) -> Result<AppSnapshot, DeployerError> {
        let app = self.orchestrator.get_app(&id.app_id()).await?;
        match app.deployment_id() {
            Some(owner) if owner == *id => Ok(app),
            Some(owner) => Err(DeployerError::NotFound(format!(
                "app {} belongs to {}, not {}",
                app.app_id, owner, id
            ))),
            None => Err(DeployerError::NotFound(format!(
                "app {} is not a deployment of {}",
                app.app_id, id
            ))),
        }
    }

    /// Status of every module deployed by this deployer
    pub async fn status_all(&self) -> Result<BTreeMap<DeploymentId, DeploymentStatus>, DeployerError> {
        let apps = self.orchestrator.list_apps().await?;
        debug!("Orchestrator reported {} apps", apps.len());
        group_statuses(apps)
    }
}
