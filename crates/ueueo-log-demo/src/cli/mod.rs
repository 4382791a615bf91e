//! Subcommand implementations.

pub mod burst;
pub mod config;
pub mod emit;
