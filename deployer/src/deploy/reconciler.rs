//! Deployment status reconciliation
//!
//! Turns a desired instance count and the instances the orchestrator reports
//! as running into a per-slot status report. Slots carry no identity: running
//! instances fill the first slots in the order they were reported, which is
//! not stable across polls.

use std::collections::BTreeMap;

use tracing::debug;

use crate::errors::DeployerError;
use crate::models::deployment::DeploymentId;
use crate::models::status::{DeploymentStatus, InstanceRecord, InstanceStatus};
use crate::orchestrator::AppSnapshot;

/// Build the status report of one deployment
///
/// Every running instance yields an up slot, even past `desired`; down slots
/// pad the report up to `desired`.
pub fn reconcile(
    id: DeploymentId,
    desired: i64,
    running: Vec<InstanceRecord>,
) -> Result<DeploymentStatus, DeployerError> {
    let desired = usize::try_from(desired).map_err(|_| {
        DeployerError::InvalidArgument(format!(
            "desired instance count of {} must not be negative, got {}",
            id, desired
        ))
    })?;

    let padding = desired.saturating_sub(running.len());
    let mut instances: Vec<InstanceStatus> = running.into_iter().map(InstanceStatus::Up).collect();
    instances.extend(std::iter::repeat(InstanceStatus::Down).take(padding));

    Ok(DeploymentStatus::new(id, desired, instances))
}

/// Build the status report of every deployment found among `apps`
///
/// Apps are grouped by the deployment they belong to; a group's desired count
/// is the sum over its apps and its instances are concatenated in listing
/// order. Apps without a deployment marker are skipped.
pub fn group_statuses<I>(apps: I) -> Result<BTreeMap<DeploymentId, DeploymentStatus>, DeployerError>
where
    I: IntoIterator<Item = AppSnapshot>,
{
    let mut groups: BTreeMap<DeploymentId, (i64, Vec<InstanceRecord>)> = BTreeMap::new();

    for app in apps {
        let Some(id) = app.deployment_id() else {
            debug!("Skipping app without deployment marker: {}", app.app_id);
            continue;
        };
        let (desired, running) = groups.entry(id).or_default();
        *desired += app.instances;
        running.extend(app.tasks);
    }

    groups
        .into_iter()
        .map(|(id, (desired, running))| {
            reconcile(id.clone(), desired, running).map(|status| (id, status))
        })
        .collect()
}
