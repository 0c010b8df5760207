//! Marathon Module Deployer Library
//!
//! Deploys data flow modules as Marathon applications and reconciles the
//! instances Marathon reports into per-slot deployment status.

pub mod app;
pub mod deploy;
pub mod errors;
pub mod http;
pub mod logs;
pub mod models;
pub mod orchestrator;
pub mod resource;
pub mod server;
pub mod settings;
pub mod utils;
