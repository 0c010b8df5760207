//! API models

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Application definition, as sent to `POST /v2/apps` and returned by the
/// app endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct App {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmd: Option<String>,

    #[serde(default)]
    pub cpus: f64,

    #[serde(default)]
    pub mem: f64,

    /// Number of instances the app was asked to run
    #[serde(default)]
    pub instances: i64,

    #[serde(default)]
    pub env: BTreeMap<String, String>,

    #[serde(default)]
    pub labels: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<Container>,

    /// Running tasks, only present when embedded by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<Task>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks_running: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks_staged: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Container settings of an app
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    /// Container runtime, `DOCKER` or `MESOS`
    #[serde(rename = "type")]
    pub container_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker: Option<Docker>,
}

impl Container {
    /// Docker container running the given image
    pub fn docker(docker: Docker) -> Self {
        Self {
            container_type: "DOCKER".to_string(),
            docker: Some(docker),
        }
    }
}

/// Docker settings of a container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Docker {
    pub image: String,

    /// Network mode: `BRIDGE`, `HOST` or `NONE`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,

    #[serde(default)]
    pub port_mappings: Vec<PortMapping>,

    #[serde(default)]
    pub force_pull_image: bool,
}

/// Container to host port mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortMapping {
    pub container_port: u16,

    /// `0` asks Marathon to pick a random host port
    #[serde(default)]
    pub host_port: u16,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_port: Option<u16>,

    #[serde(default = "default_protocol")]
    pub protocol: String,
}

fn default_protocol() -> String {
    "tcp".to_string()
}

impl PortMapping {
    /// TCP mapping for a container port
    pub fn tcp(container_port: u16, host_port: u16) -> Self {
        Self {
            container_port,
            host_port,
            service_port: None,
            protocol: default_protocol(),
        }
    }
}

/// A running task of an app
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,

    #[serde(default)]
    pub app_id: String,

    #[serde(default)]
    pub host: String,

    #[serde(default)]
    pub ports: Vec<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staged_at: Option<DateTime<Utc>>,
}

/// Response of `GET /v2/apps/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetAppResponse {
    pub app: App,
}

/// Response of `GET /v2/apps`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetAppsResponse {
    #[serde(default)]
    pub apps: Vec<App>,
}

/// Error body returned by Marathon on failed requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
