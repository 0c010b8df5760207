//! Application wiring

use std::sync::Arc;

use tracing::info;

use crate::deploy::deployer::AppDeployer;
use crate::errors::DeployerError;
use crate::http::client::MarathonClient;
use crate::orchestrator::Orchestrator;
use crate::resource::DelegatingResourceLoader;
use crate::settings::Settings;

/// Components shared by the server and its handlers
pub struct AppContext {
    pub settings: Arc<Settings>,

    /// Deployer for stream modules
    pub process_deployer: Arc<AppDeployer>,

    /// Deployer for task modules, the same instance as the process deployer
    pub task_deployer: Arc<AppDeployer>,

    pub resource_loader: Arc<DelegatingResourceLoader>,
}

impl AppContext {
    /// Wire the context against Marathon
    pub fn build(settings: Settings) -> Result<Self, DeployerError> {
        settings.validate()?;
        let orchestrator: Arc<dyn Orchestrator> = Arc::new(MarathonClient::new(&settings.marathon)?);
        info!("Using Marathon at {}", settings.marathon.api_endpoint);
        Ok(Self::with_orchestrator(settings, orchestrator))
    }

    /// Wire the context around an existing orchestrator handle
    pub fn with_orchestrator(settings: Settings, orchestrator: Arc<dyn Orchestrator>) -> Self {
        let settings = Arc::new(settings);
        let resource_loader = Arc::new(DelegatingResourceLoader::new());
        let process_deployer = Arc::new(AppDeployer::new(
            orchestrator,
            settings.clone(),
            resource_loader.clone(),
        ));

        Self {
            settings,
            task_deployer: process_deployer.clone(),
            process_deployer,
            resource_loader,
        }
    }
}
