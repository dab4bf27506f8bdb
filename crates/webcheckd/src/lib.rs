//! Webcheck daemon library - exposes modules for testing.

pub mod config;
pub mod routes;
pub mod server;
pub mod upstream;
