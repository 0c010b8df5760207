//! Module resource resolution
//!
//! Resource coordinates select how a module is packaged. `docker:<image>`
//! names an image that runs the module directly; anything else is handed to
//! the module launcher image as Maven coordinates.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::errors::DeployerError;

/// A resolved module resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    /// Image running the module itself
    Docker { image: String },

    /// Artifact the module launcher resolves
    Maven { coordinates: String },
}

/// Resolves the location part of a resource coordinate
pub trait ResourceLoader: Send + Sync {
    fn load(&self, location: &str) -> Result<Resource, DeployerError>;
}

/// Loader for `docker:` coordinates
pub struct DockerResourceLoader;

impl ResourceLoader for DockerResourceLoader {
    fn load(&self, location: &str) -> Result<Resource, DeployerError> {
        let image = location.trim_start_matches("//");
        if image.is_empty() {
            return Err(DeployerError::InvalidArgument(
                "docker resource without an image".to_string(),
            ));
        }
        Ok(Resource::Docker {
            image: image.to_string(),
        })
    }
}

/// Loader for Maven coordinates
pub struct MavenResourceLoader;

impl ResourceLoader for MavenResourceLoader {
    fn load(&self, location: &str) -> Result<Resource, DeployerError> {
        // group:artifact[:extension[:classifier]]:version
        let parts = location.split(':').count();
        if !(3..=5).contains(&parts) || location.split(':').any(str::is_empty) {
            return Err(DeployerError::InvalidArgument(format!(
                "invalid maven coordinates: {}",
                location
            )));
        }
        Ok(Resource::Maven {
            coordinates: location.to_string(),
        })
    }
}

/// Dispatches coordinates to a loader by scheme
///
/// Coordinates whose prefix is not a registered scheme go to the `maven`
/// loader whole, since Maven coordinates themselves contain `:`.
pub struct DelegatingResourceLoader {
    loaders: BTreeMap<String, Arc<dyn ResourceLoader>>,
}

impl DelegatingResourceLoader {
    /// Registry with the `docker` and `maven` loaders
    pub fn new() -> Self {
        let mut loaders: BTreeMap<String, Arc<dyn ResourceLoader>> = BTreeMap::new();
        loaders.insert("docker".to_string(), Arc::new(DockerResourceLoader));
        loaders.insert("maven".to_string(), Arc::new(MavenResourceLoader));
        Self { loaders }
    }

    pub fn register(&mut self, scheme: impl Into<String>, loader: Arc<dyn ResourceLoader>) {
        self.loaders.insert(scheme.into(), loader);
    }

    pub fn contains(&self, scheme: &str) -> bool {
        self.loaders.contains_key(scheme)
    }

    pub fn schemes(&self) -> Vec<String> {
        self.loaders.keys().cloned().collect()
    }

    /// Resolve resource coordinates
    pub fn resolve(&self, coordinates: &str) -> Result<Resource, DeployerError> {
        let coordinates = coordinates.trim();
        if let Some((scheme, location)) = coordinates.split_once(':') {
            if let Some(loader) = self.loaders.get(scheme) {
                return loader.load(location);
            }
        }

        match self.loaders.get("maven") {
            Some(loader) => loader.load(coordinates),
            None => Err(DeployerError::InvalidArgument(format!(
                "no resource loader for {}",
                coordinates
            ))),
        }
    }
}

impl Default for DelegatingResourceLoader {
    fn default() -> Self {
        Self::new()
    }
}
