//! # skillmatrix
//!
//! Application layer around `skillmatrix-core`: configuration, snapshot
//! loading, the CLI and the HTTP API.

pub mod api;
pub mod cli;
pub mod config;
pub mod loader;
