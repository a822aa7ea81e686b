//! CLI library components for the LEED wide transpiler.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod types;
