//! High-level operations wiring the CLI to the deploy pipeline:
//! bundle extraction, the per-artifact deploy loop, and run planning.

pub mod bundle;
pub mod ops_deploy;
pub mod ops_plan;
