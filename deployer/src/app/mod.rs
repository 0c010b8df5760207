//! Application wiring and lifecycle

pub mod context;
pub mod run;
