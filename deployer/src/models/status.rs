//! Deployment status models

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::deployment::DeploymentId;

/// A running instance as reported by the orchestrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceRecord {
    /// Orchestrator task id
    pub id: String,

    /// Host the instance runs on
    pub host: String,

    /// Host ports exposed by the instance
    #[serde(default)]
    pub ports: Vec<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
}

/// State of one instance slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceState {
    Up,
    Down,
}

/// Status of one instance slot of a deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum InstanceStatus {
    /// A running instance
    Up(InstanceRecord),

    /// A desired slot with nothing scheduled on it
    Down,
}

impl InstanceStatus {
    pub fn state(&self) -> InstanceState {
        match self {
            InstanceStatus::Up(_) => InstanceState::Up,
            InstanceStatus::Down => InstanceState::Down,
        }
    }

    pub fn is_up(&self) -> bool {
        matches!(self, InstanceStatus::Up(_))
    }

    pub fn instance(&self) -> Option<&InstanceRecord> {
        match self {
            InstanceStatus::Up(record) => Some(record),
            InstanceStatus::Down => None,
        }
    }

    /// Display attributes of the slot; empty for down slots
    pub fn attributes(&self) -> BTreeMap<String, String> {
        let mut attributes = BTreeMap::new();
        if let InstanceStatus::Up(record) = self {
            attributes.insert("instance.id".to_string(), record.id.clone());
            attributes.insert("host".to_string(), record.host.clone());
            if let Some(port) = record.ports.first() {
                attributes.insert("port".to_string(), port.to_string());
            }
        }
        attributes
    }
}

/// Aggregate state of a deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentState {
    /// Every desired instance is up, including when none are desired
    Deployed,

    /// Some but not all desired instances are up
    Incomplete,

    /// Instances are desired but none is up
    Failed,
}

/// Per-slot status report of a deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentStatus {
    id: DeploymentId,
    desired: usize,
    instances: Vec<InstanceStatus>,
}

impl DeploymentStatus {
    pub(crate) fn new(id: DeploymentId, desired: usize, instances: Vec<InstanceStatus>) -> Self {
        Self {
            id,
            desired,
            instances,
        }
    }

    pub fn id(&self) -> &DeploymentId {
        &self.id
    }

    /// Up slots first in reported order, then down padding
    pub fn instances(&self) -> &[InstanceStatus] {
        &self.instances
    }

    pub fn desired_count(&self) -> usize {
        self.desired
    }

    pub fn up_count(&self) -> usize {
        self.instances.iter().filter(|s| s.is_up()).count()
    }

    pub fn down_count(&self) -> usize {
        self.instances.len() - self.up_count()
    }

    pub fn state(&self) -> DeploymentState {
        let up = self.up_count();
        if up >= self.desired {
            DeploymentState::Deployed
        } else if up == 0 {
            DeploymentState::Failed
        } else {
            DeploymentState::Incomplete
        }
    }
}
