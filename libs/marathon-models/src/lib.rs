//! Marathon v2 REST API models
//!
//! Only the subset of the app and task resources used by the module deployer
//! is modelled. Unknown fields are ignored on deserialization.

mod models;

pub use models::*;
