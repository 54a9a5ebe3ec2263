//! Operation: deploy every configured snapshot artifact.
//!
//! One settings document is generated into a scratch directory that lives
//! for the whole run. Each artifact is then processed strictly in list
//! order inside its own scratch directory:
//!
//! 1. unpack `{artifact}_bundle.jar`
//! 2. resolve which classified jars exist
//! 3. run `deploy:deploy-file`
//! 4. remove the scratch directory
//!
//! Tool failures are governed by [`FailurePolicy`]: `Continue` logs and
//! moves on, `Abort` stops the run. Scratch directories are removed either way.

use std::path::{Path, PathBuf};

use snapdeploy_core::config::{Credentials, DeployConfig, FailurePolicy};
use snapdeploy_maven::classifier::{self, ClassifiedFile};
use snapdeploy_maven::deploy::{self, DeployTool};
use snapdeploy_maven::repository::SnapshotRepository;
use snapdeploy_maven::settings::{self, SETTINGS_FILE_NAME};
use snapdeploy_util::errors::DeployError;
use snapdeploy_util::fs::with_scoped_temp_dir;
use snapdeploy_util::process::{CommandRunner, ToolStatus};
use snapdeploy_util::progress;

use crate::bundle::{self, ExtractOptions};

const SETTINGS_SCOPE_PREFIX: &str = "snapdeploy-settings-";
const ARTIFACT_SCOPE_PREFIX: &str = "snapdeploy-artifact-";

/// What happened to one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactOutcome {
    pub artifact: String,
    pub extraction: ToolStatus,
    pub files: Vec<ClassifiedFile>,
    pub deploy: ToolStatus,
}

impl ArtifactOutcome {
    pub fn is_failure(&self) -> bool {
        self.extraction.is_failure() || self.deploy.is_failure()
    }
}

/// Per-artifact outcomes of a run, in deploy order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployReport {
    pub artifacts: Vec<ArtifactOutcome>,
}

impl DeployReport {
    pub fn failures(&self) -> impl Iterator<Item = &ArtifactOutcome> {
        self.artifacts.iter().filter(|a| a.is_failure())
    }

    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Deploy all artifacts named in `config`.
///
/// `credentials` must already be resolved; nothing on disk is touched until
/// the config has been validated.
pub fn deploy_all(
    runner: &dyn CommandRunner,
    config: &DeployConfig,
    credentials: &Credentials,
) -> miette::Result<DeployReport> {
    config.validate()?;

    let scratch_root = config.scratch_root.as_deref();
    let tool = DeployTool {
        program: config.tools.deploy.clone(),
        repository: SnapshotRepository::from_config(&config.repository),
        dry_run: config.dry_run,
    };
    let extract = ExtractOptions::from_config(config);

    with_scoped_temp_dir(scratch_root, SETTINGS_SCOPE_PREFIX, |settings_dir| {
        let settings_path = settings_dir.join(SETTINGS_FILE_NAME);
        settings::generate_settings(&settings_path, credentials, &tool.repository.id)?;

        let mut report = DeployReport::default();
        for artifact in &config.artifacts {
            let outcome = with_scoped_temp_dir(scratch_root, ARTIFACT_SCOPE_PREFIX, |work_dir| {
                deploy_artifact(
                    runner,
                    config,
                    &extract,
                    &tool,
                    &settings_path,
                    artifact,
                    work_dir,
                )
            })?;
            report.artifacts.push(outcome);
        }

        summarize(&report);
        Ok(report)
    })
}

fn deploy_artifact(
    runner: &dyn CommandRunner,
    config: &DeployConfig,
    extract: &ExtractOptions,
    tool: &DeployTool,
    settings_path: &Path,
    artifact: &str,
    work_dir: &Path,
) -> miette::Result<ArtifactOutcome> {
    progress::status("Extracting", artifact);
    let extraction = bundle::extract_bundle(runner, extract, artifact, work_dir)?;
    if let ToolStatus::Failed { reason, .. } = &extraction {
        match config.on_tool_failure {
            FailurePolicy::Continue => {
                tracing::warn!("Extraction failed for {artifact}: {reason}, continuing");
            }
            FailurePolicy::Abort => {
                return Err(DeployError::ExtractionFailed {
                    artifact: artifact.to_string(),
                    reason: reason.clone(),
                }
                .into());
            }
        }
    }

    let files = classifier::resolve_classified_files(artifact, &config.version, work_dir);
    if files.is_empty() {
        tracing::warn!("No jars found for {artifact} in extracted bundle");
    }
    let pom: PathBuf = classifier::pom_path(artifact, &config.version, work_dir);

    progress::status("Deploying", &format!("{artifact} ({} files)", files.len()));
    let deploy_status = deploy::deploy_snapshot(runner, tool, settings_path, &pom, &files)?;
    if let ToolStatus::Failed { reason, .. } = &deploy_status {
        match config.on_tool_failure {
            FailurePolicy::Continue => {
                tracing::warn!("Deploy failed for {artifact}: {reason}, continuing");
            }
            FailurePolicy::Abort => {
                return Err(DeployError::DeployFailed {
                    artifact: artifact.to_string(),
                    reason: reason.clone(),
                }
                .into());
            }
        }
    }

    Ok(ArtifactOutcome {
        artifact: artifact.to_string(),
        extraction,
        files,
        deploy: deploy_status,
    })
}

fn summarize(report: &DeployReport) {
    for outcome in report.failures() {
        let step = if outcome.extraction.is_failure() {
            format!("extraction {}", outcome.extraction)
        } else {
            format!("deploy {}", outcome.deploy)
        };
        progress::status_warn("Failed", &format!("{}: {step}", outcome.artifact));
    }
    let failed = report.failures().count();
    progress::status_info(
        "Finished",
        &format!(
            "{} artifact(s), {} with tool failures",
            report.artifacts.len(),
            failed
        ),
    );
}
