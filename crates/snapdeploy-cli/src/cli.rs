//! CLI argument definitions for snapdeploy.
//!
//! Running `snapdeploy` with no subcommand deploys. Credentials never come
//! from flags; they are read from `SONATYPE_USERNAME` / `SONATYPE_PASSWORD`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use snapdeploy_core::config::FailurePolicy;

#[derive(Parser, Debug)]
#[command(
    name = "snapdeploy",
    version,
    about = "Publish snapshot bundles to a Maven snapshot repository",
    long_about = "snapdeploy unpacks each artifact's bundle archive produced by the build, \
                  generates a throwaway settings.xml from SONATYPE_USERNAME/SONATYPE_PASSWORD, \
                  and runs `mvn deploy:deploy-file` for every artifact in order."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Config file (defaults to ./snapdeploy.toml when present)
    #[arg(long, global = true, env = "SNAPDEPLOY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Deploy only these artifacts, in this order (repeatable)
    #[arg(long = "artifact", global = true, value_name = "ID")]
    pub artifacts: Vec<String>,

    /// Directory holding {id}_bundle.jar archives
    #[arg(long, global = true)]
    pub bundle_root: Option<PathBuf>,

    /// What to do when unzip or mvn fails: continue or abort
    #[arg(long, global = true, value_name = "POLICY")]
    pub on_tool_failure: Option<FailurePolicy>,

    /// Print deploy commands instead of running them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Deploy every configured artifact (the default)
    Deploy,

    /// List the artifacts and bundle archives a deploy would use
    Plan,
}

/// Parse CLI arguments from the process environment.
pub fn parse() -> Cli {
    Cli::parse()
}
