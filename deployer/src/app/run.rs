//! Main application run loop

use std::future::Future;
use std::sync::Arc;

use tracing::{error, info};

use crate::app::context::AppContext;
use crate::errors::DeployerError;
use crate::server::serve::serve;
use crate::server::state::ServerState;
use crate::settings::Settings;

/// Run the deployer server until `shutdown_signal` resolves
pub async fn run(
    settings: Settings,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<(), DeployerError> {
    info!("Initializing Marathon deployer...");

    let server = settings.server.clone();
    let context = AppContext::build(settings)?;
    let state = Arc::new(ServerState::new(context.process_deployer.clone()));

    let handle = serve(&server, state, shutdown_signal).await?;

    match handle.await {
        Ok(result) => {
            info!("Marathon deployer stopped");
            result
        }
        Err(e) => {
            error!("Server task failed: {}", e);
            Err(DeployerError::ServerError(e.to_string()))
        }
    }
}
