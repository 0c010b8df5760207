//! Deployment models

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Label carrying the deployment group on apps created by this deployer
pub const GROUP_LABEL: &str = "spring-cloud-dataflow-group";

/// Label carrying the deployment label on apps created by this deployer
pub const LABEL_LABEL: &str = "spring-cloud-dataflow-label";

/// Identity of a deployed module: the stream or task name (group) and the
/// module label within it
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DeploymentId {
    group: String,
    label: String,
}

impl DeploymentId {
    pub fn new(group: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            label: label.into(),
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Marathon app id for this deployment
    pub fn app_id(&self) -> String {
        deduce_app_id(&self.group, &self.label)
    }

    /// Labels to attach to the app so the id can be recovered from listings
    pub fn to_labels(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (GROUP_LABEL.to_string(), self.group.clone()),
            (LABEL_LABEL.to_string(), self.label.clone()),
        ])
    }

    /// Recover the id from app labels, `None` when the app was not created
    /// by this deployer
    pub fn from_labels(labels: &BTreeMap<String, String>) -> Option<Self> {
        let group = labels.get(GROUP_LABEL).filter(|g| !g.is_empty())?;
        let label = labels.get(LABEL_LABEL).filter(|l| !l.is_empty())?;
        Some(Self::new(group.clone(), label.clone()))
    }
}

impl fmt::Display for DeploymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.label)
    }
}

/// Marathon app id of the module `label` in `group`
pub fn deduce_app_id(group: &str, label: &str) -> String {
    format!("{}-{}", group, label)
}

/// Request to deploy one module
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentRequest {
    /// Stream or task the module belongs to
    pub group: String,

    /// Module label within the group
    pub label: String,

    /// Module parameters from the definition
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,

    /// Resource coordinates of the module, e.g. Maven coordinates or
    /// `docker:<image>`
    pub coordinates: String,

    /// Deployment scoped properties, e.g. `marathon.memory`
    #[serde(default)]
    pub deployment_properties: BTreeMap<String, String>,

    /// Number of instances to run
    #[serde(default = "default_count")]
    pub count: u32,
}

fn default_count() -> u32 {
    1
}

impl DeploymentRequest {
    pub fn deployment_id(&self) -> DeploymentId {
        DeploymentId::new(self.group.clone(), self.label.clone())
    }
}
