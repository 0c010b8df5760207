//! HTTP request handlers

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::DeployerError;
use crate::models::deployment::{DeploymentId, DeploymentRequest};
use crate::models::status::{DeploymentState, DeploymentStatus, InstanceState};
use crate::server::state::ServerState;
use crate::utils::version_info;

/// Error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Deployer error rendered as an HTTP response
#[derive(Debug)]
pub struct ApiError(DeployerError);

impl From<DeployerError> for ApiError {
    fn from(err: DeployerError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match &self.0 {
            DeployerError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            DeployerError::InvalidArgument(_) => (StatusCode::BAD_REQUEST, "invalid_argument"),
            e if e.is_transport() => (StatusCode::BAD_GATEWAY, "orchestrator_failure"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        };
        warn!("Request failed with {}: {}", status, self.0);

        let body = ErrorResponse {
            error: error.to_string(),
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Health check handler
pub async fn health_handler() -> impl IntoResponse {
    let version = version_info();
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "marathon-deployer".to_string(),
        version: version.version,
    })
}

/// Version handler
pub async fn version_handler() -> impl IntoResponse {
    Json(version_info())
}

/// Deploy response
#[derive(Debug, Serialize, Deserialize)]
pub struct DeployResponse {
    pub group: String,
    pub label: String,
    pub app_id: String,
}

/// Deploy handler
///
/// Malformed bodies are answered with the same JSON error shape as every
/// other failure.
pub async fn deploy_handler(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<DeploymentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) =
        payload.map_err(|rejection| DeployerError::InvalidArgument(rejection.body_text()))?;
    let id = state.deployer.deploy(&request).await?;

    Ok((
        StatusCode::CREATED,
        Json(DeployResponse {
            group: id.group().to_string(),
            label: id.label().to_string(),
            app_id: id.app_id(),
        }),
    ))
}

/// Undeploy handler
pub async fn undeploy_handler(
    State(state): State<Arc<ServerState>>,
    Path((group, label)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state.deployer.undeploy(&DeploymentId::new(group, label)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// One instance slot in a status response
#[derive(Debug, Serialize, Deserialize)]
pub struct InstanceView {
    pub state: InstanceState,
    pub attributes: BTreeMap<String, String>,
}

/// Deployment status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub group: String,
    pub label: String,
    pub state: DeploymentState,
    pub desired: usize,
    pub up: usize,
    pub down: usize,
    pub instances: Vec<InstanceView>,
}

impl From<&DeploymentStatus> for StatusResponse {
    fn from(status: &DeploymentStatus) -> Self {
        Self {
            group: status.id().group().to_string(),
            label: status.id().label().to_string(),
            state: status.state(),
            desired: status.desired_count(),
            up: status.up_count(),
            down: status.down_count(),
            instances: status
                .instances()
                .iter()
                .map(|s| InstanceView {
                    state: s.state(),
                    attributes: s.attributes(),
                })
                .collect(),
        }
    }
}

/// Status handler
pub async fn status_handler(
    State(state): State<Arc<ServerState>>,
    Path((group, label)): Path<(String, String)>,
) -> Result<Json<StatusResponse>, ApiError> {
    let status = state.deployer.status(&DeploymentId::new(group, label)).await?;
    Ok(Json(StatusResponse::from(&status)))
}

/// Statuses response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusesResponse {
    pub deployments: Vec<StatusResponse>,
    pub total: usize,
}

/// Status of all deployments handler
pub async fn status_all_handler(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<StatusesResponse>, ApiError> {
    let statuses = state.deployer.status_all().await?;
    let deployments: Vec<StatusResponse> = statuses.values().map(StatusResponse::from).collect();
    let total = deployments.len();

    Ok(Json(StatusesResponse { deployments, total }))
}
