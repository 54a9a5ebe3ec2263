//! Shared utilities for snapdeploy.
//!
//! This crate provides cross-cutting concerns used by the other snapdeploy
//! crates: error types, scoped scratch directories, external process
//! execution, and terminal status lines.

pub mod errors;
pub mod fs;
pub mod process;
pub mod progress;
