//! Deployment module

pub mod app_builder;
pub mod deployer;
pub mod reconciler;
