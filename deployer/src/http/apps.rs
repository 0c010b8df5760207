//! Marathon app endpoints

use async_trait::async_trait;
use marathon_models::{App, GetAppResponse, GetAppsResponse};

use crate::errors::DeployerError;
use crate::http::client::MarathonClient;
use crate::orchestrator::{AppSnapshot, Orchestrator};

fn app_path(app_id: &str) -> String {
    format!("/v2/apps/{}", app_id.trim_start_matches('/'))
}

#[async_trait]
impl Orchestrator for MarathonClient {
    async fn create_app(&self, app: &App) -> Result<(), DeployerError> {
        self.post("/v2/apps", app).await
    }

    async fn delete_app(&self, app_id: &str) -> Result<(), DeployerError> {
        self.delete(&app_path(app_id)).await
    }

    async fn get_app(&self, app_id: &str) -> Result<AppSnapshot, DeployerError> {
        let response: GetAppResponse = self.get(&app_path(app_id)).await?;
        Ok(response.app.into())
    }

    async fn list_apps(&self) -> Result<Vec<AppSnapshot>, DeployerError> {
        let response: GetAppsResponse = self.get("/v2/apps?embed=apps.tasks").await?;
        Ok(response.apps.into_iter().map(AppSnapshot::from).collect())
    }
}
