//! Terminal output for the installer

pub mod display;
