//! Webcheck control library - exposes modules for testing.

pub mod client;
pub mod commands;
pub mod errors;
pub mod render;
pub mod site;
