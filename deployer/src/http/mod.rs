//! Marathon HTTP client

pub mod apps;
pub mod client;
