//! CLI command implementations.

pub mod env;
pub mod volume;
