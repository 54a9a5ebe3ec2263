//! Command dispatch and handler modules.

mod deploy;
mod plan;

use std::path::Path;

use miette::Result;
use snapdeploy_core::config::DeployConfig;
use snapdeploy_util::errors::DeployError;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command.unwrap_or(Command::Deploy) {
        Command::Deploy => deploy::exec(&cli),
        Command::Plan => plan::exec(&cli),
    }
}

/// Load the config file and apply CLI overrides on top.
fn load_config(root: &Path, cli: &Cli) -> Result<DeployConfig> {
    let mut config = match cli.config {
        Some(ref path) => DeployConfig::from_path(&root.join(path))?,
        None => DeployConfig::load(root)?,
    };

    if !cli.artifacts.is_empty() {
        config.artifacts = cli.artifacts.clone();
    }
    if let Some(ref bundle_root) = cli.bundle_root {
        config.bundle_root = bundle_root.clone();
    }
    if let Some(policy) = cli.on_tool_failure {
        config.on_tool_failure = policy;
    }
    if cli.dry_run {
        config.dry_run = true;
    }

    config.anchor(root);
    Ok(config)
}

fn current_dir() -> Result<std::path::PathBuf> {
    Ok(std::env::current_dir().map_err(DeployError::Io)?)
}
