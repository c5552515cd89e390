//! CLI library components for the course activity loader.

pub mod logging;
pub mod report;
