//! Core data types for snapdeploy.
//!
//! This crate defines the explicit configuration a deploy run is driven by:
//! the ordered artifact list, bundle layout, target repository, external
//! tool names, failure policy, and the repository credentials.
//!
//! Nothing here reads the process environment except
//! [`config::Credentials::from_env`], which the CLI calls once at startup.

pub mod config;
