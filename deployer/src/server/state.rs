//! Server state

use std::sync::Arc;

use crate::deploy::deployer::AppDeployer;

/// Server state shared across handlers
pub struct ServerState {
    pub deployer: Arc<AppDeployer>,
}

impl ServerState {
    pub fn new(deployer: Arc<AppDeployer>) -> Self {
        Self { deployer }
    }
}
