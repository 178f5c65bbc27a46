//! Command implementations for the darth-waydr CLI

pub mod completions;
pub mod config;
pub mod install;
