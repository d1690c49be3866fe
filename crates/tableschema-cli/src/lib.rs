//! CLI components for the `tableschema` tool.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
