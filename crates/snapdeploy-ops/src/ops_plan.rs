//! Operation: list what a deploy run would do, without side effects.

use std::path::PathBuf;

use snapdeploy_core::config::DeployConfig;

/// One artifact of a planned run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedArtifact {
    pub artifact: String,
    pub bundle: PathBuf,
    pub bundle_exists: bool,
}

/// Resolve the bundle location of every configured artifact, in deploy order.
pub fn plan(config: &DeployConfig) -> miette::Result<Vec<PlannedArtifact>> {
    config.validate()?;
    Ok(config
        .artifacts
        .iter()
        .map(|artifact| {
            let bundle = config.bundle_path(artifact);
            PlannedArtifact {
                artifact: artifact.clone(),
                bundle_exists: bundle.is_file(),
                bundle,
            }
        })
        .collect())
}
