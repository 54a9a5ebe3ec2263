use miette::Result;

use snapdeploy_core::config::Credentials;
use snapdeploy_ops::ops_deploy;
use snapdeploy_util::process::SystemRunner;

use crate::cli::Cli;

pub fn exec(cli: &Cli) -> Result<()> {
    // Credentials first: a missing variable must stop the run before anything is created.
    let credentials = Credentials::from_env()?;

    let root = super::current_dir()?;
    let config = super::load_config(&root, cli)?;
    tracing::info!(
        "Deploying {} artifact(s) to {} ({:?} on tool failure)",
        config.artifacts.len(),
        config.repository.url,
        config.on_tool_failure
    );

    let report = ops_deploy::deploy_all(&SystemRunner, &config, &credentials)?;
    if !report.is_success() {
        tracing::warn!(
            "{} artifact(s) had tool failures",
            report.failures().count()
        );
    }
    Ok(())
}
