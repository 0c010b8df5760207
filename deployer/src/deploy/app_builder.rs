//! Marathon app definitions for module deployment requests

use std::collections::BTreeMap;

use marathon_models::{App, Container, Docker, PortMapping};

use crate::errors::DeployerError;
use crate::models::deployment::DeploymentRequest;
use crate::resource::{DelegatingResourceLoader, Resource};
use crate::settings::{MarathonSettings, Settings};

/// Deployment property overriding the memory of each instance
pub const MEMORY_PROPERTY: &str = "marathon.memory";

/// Deployment property overriding the CPU share of each instance
pub const CPU_PROPERTY: &str = "marathon.cpu";

/// Module argument holding the JMX default domain
pub const JMX_DEFAULT_DOMAIN_KEY: &str = "spring.jmx.default-domain";

/// Port the module listens on inside its container
pub const CONTAINER_PORT: u16 = 8080;

const INCLUDES_KEY: &str = "includes";

/// Builds Marathon app definitions from deployment requests
pub struct AppBuilder<'a> {
    settings: &'a Settings,
    resources: &'a DelegatingResourceLoader,
}

impl<'a> AppBuilder<'a> {
    pub fn new(settings: &'a Settings, resources: &'a DelegatingResourceLoader) -> Self {
        Self {
            settings,
            resources,
        }
    }

    /// Build the app definition for a request
    pub fn build(&self, request: &DeploymentRequest) -> Result<App, DeployerError> {
        validate(request)?;
        let marathon = &self.settings.marathon;
        let id = request.deployment_id();

        let resource = self.resources.resolve(&request.coordinates)?;
        let (image, modules) = match resource {
            Resource::Docker { image } => (image, request.coordinates.clone()),
            Resource::Maven { coordinates } => (marathon.image.clone(), coordinates),
        };

        let mut env = qualify_args(0, &module_args(request, marathon));
        env.extend(qualify_args(
            0,
            &BTreeMap::from([(
                JMX_DEFAULT_DOMAIN_KEY.to_string(),
                format!("{}.{}", id.group(), id.label()),
            )]),
        ));
        env.extend(self.settings.server_properties.clone());
        env.insert("MODULES".to_string(), modules);
        env.insert("spring.profiles.active".to_string(), "cloud".to_string());
        // Discovered by the Marathon cloud connector inside the module
        env.insert(
            "SPRING_CLOUD_MARATHON_HOST".to_string(),
            marathon.api_endpoint.clone(),
        );

        Ok(App {
            id: id.app_id(),
            cpus: deduce_cpus(request, marathon)?,
            mem: deduce_memory(request, marathon)?,
            instances: i64::from(request.count),
            env,
            labels: id.to_labels(),
            container: Some(Container::docker(Docker {
                image,
                network: Some("BRIDGE".to_string()),
                port_mappings: vec![PortMapping::tcp(CONTAINER_PORT, 0)],
                force_pull_image: false,
            })),
            ..Default::default()
        })
    }
}

fn validate(request: &DeploymentRequest) -> Result<(), DeployerError> {
    if request.group.trim().is_empty() {
        return Err(DeployerError::InvalidArgument(
            "deployment group must not be empty".to_string(),
        ));
    }
    if request.label.trim().is_empty() {
        return Err(DeployerError::InvalidArgument(
            "deployment label must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Module arguments: deployment properties overridden by definition
/// parameters, with the configured includes merged in
fn module_args(request: &DeploymentRequest, marathon: &MarathonSettings) -> BTreeMap<String, String> {
    let mut args = request.deployment_properties.clone();
    args.extend(request.parameters.clone());

    let includes = merge_includes(args.get(INCLUDES_KEY).map(String::as_str), &marathon.includes);
    args.insert(INCLUDES_KEY.to_string(), includes);
    args
}

/// Caller includes first, then the configured ones; empty parts are dropped
pub fn merge_includes(requested: Option<&str>, configured: &str) -> String {
    [requested.unwrap_or_default(), configured]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

/// Prefix arguments for the module at `index` in the launcher
pub fn qualify_args(index: usize, args: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    args.iter()
        .map(|(key, value)| (format!("args.{}.{}", index, key), value.clone()))
        .collect()
}

fn deduce_memory(request: &DeploymentRequest, marathon: &MarathonSettings) -> Result<f64, DeployerError> {
    resource_override(request, MEMORY_PROPERTY).map(|o| o.unwrap_or(marathon.memory))
}

fn deduce_cpus(request: &DeploymentRequest, marathon: &MarathonSettings) -> Result<f64, DeployerError> {
    resource_override(request, CPU_PROPERTY).map(|o| o.unwrap_or(marathon.cpu))
}

fn resource_override(request: &DeploymentRequest, key: &str) -> Result<Option<f64>, DeployerError> {
    let Some(raw) = request.deployment_properties.get(key) else {
        return Ok(None);
    };
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(Some(value)),
        _ => Err(DeployerError::InvalidArgument(format!(
            "{} must be a positive number, got '{}'",
            key, raw
        ))),
    }
}
