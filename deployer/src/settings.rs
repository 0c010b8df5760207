//! Settings file management

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::DeployerError;
use crate::logs::LogLevel;

/// Deployer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Log as JSON on stdout
    #[serde(default)]
    pub log_json: bool,

    /// Directory for a daily rolling log file
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Local HTTP server configuration
    #[serde(default)]
    pub server: ServerSettings,

    /// Marathon configuration
    #[serde(default)]
    pub marathon: MarathonSettings,

    /// Data flow server properties forwarded to every module
    #[serde(default)]
    pub server_properties: BTreeMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_json: false,
            log_dir: None,
            server: ServerSettings::default(),
            marathon: MarathonSettings::default(),
            server_properties: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// Read settings from a JSON file
    pub async fn load(path: &Path) -> Result<Self, DeployerError> {
        debug!("Loading settings from {}", path.display());
        let contents = tokio::fs::read_to_string(path).await?;
        let settings: Settings = serde_json::from_str(&contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check values serde cannot
    pub fn validate(&self) -> Result<(), DeployerError> {
        let marathon = &self.marathon;
        if marathon.api_endpoint.trim().is_empty() {
            return Err(DeployerError::ConfigError(
                "marathon.api_endpoint must not be empty".to_string(),
            ));
        }
        if marathon.image.trim().is_empty() {
            return Err(DeployerError::ConfigError(
                "marathon.image must not be empty".to_string(),
            ));
        }
        if !(marathon.memory > 0.0) || !(marathon.cpu > 0.0) {
            return Err(DeployerError::ConfigError(format!(
                "marathon.memory and marathon.cpu must be positive, got {} and {}",
                marathon.memory, marathon.cpu
            )));
        }
        Ok(())
    }
}

/// Local HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_server_host")]
    pub host: String,

    #[serde(default = "default_server_port")]
    pub port: u16,
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    9393
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
        }
    }
}

/// Marathon settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarathonSettings {
    /// Marathon REST API endpoint
    #[serde(default = "default_api_endpoint")]
    pub api_endpoint: String,

    /// Module launcher image used for modules without a Docker resource
    #[serde(default = "default_image")]
    pub image: String,

    /// Default memory per instance, in megabytes
    #[serde(default = "default_memory")]
    pub memory: f64,

    /// Default CPU share per instance
    #[serde(default = "default_cpu")]
    pub cpu: f64,

    /// Comma separated includes appended to every module's includes
    #[serde(default)]
    pub includes: String,

    /// Timeout of a single Marathon request
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_api_endpoint() -> String {
    "http://m1.dcos/service/marathon".to_string()
}

fn default_image() -> String {
    "springcloud/stream-module-launcher".to_string()
}

fn default_memory() -> f64 {
    512.0
}

fn default_cpu() -> f64 {
    0.5
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for MarathonSettings {
    fn default() -> Self {
        Self {
            api_endpoint: default_api_endpoint(),
            image: default_image(),
            memory: default_memory(),
            cpu: default_cpu(),
            includes: String::new(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}
