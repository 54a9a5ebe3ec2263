//! `deploy:deploy-file` invocation for a single snapshot artifact.

use std::path::Path;

use snapdeploy_util::errors::DeployError;
use snapdeploy_util::process::{CommandBuilder, CommandRunner, ToolStatus};
use snapdeploy_util::progress;

use crate::classifier::ClassifiedFile;
use crate::repository::SnapshotRepository;

/// Maven goal performing a single-file deploy.
pub const DEPLOY_GOAL: &str = "deploy:deploy-file";

/// The external deploy tool and where it uploads to.
#[derive(Debug, Clone)]
pub struct DeployTool {
    pub program: String,
    pub repository: SnapshotRepository,
    pub dry_run: bool,
}

/// Build the deploy command line.
///
/// Fixed flags come first, followed by one `-D{name}=<path>` token per
/// classified file in the order given.
pub fn build_deploy_command(
    tool: &DeployTool,
    settings: &Path,
    pom: &Path,
    files: &[ClassifiedFile],
) -> CommandBuilder {
    CommandBuilder::new(&tool.program)
        .arg(DEPLOY_GOAL)
        .arg(format!("--settings={}", settings.display()))
        .arg("-DgeneratePom=false")
        .arg(format!("-DrepositoryId={}", tool.repository.id))
        .arg(format!("-Durl={}", tool.repository.url))
        .arg(format!("-DpomFile={}", pom.display()))
        .args(files.iter().map(ClassifiedFile::to_arg))
}

/// Run the deploy tool for one artifact and wait for it to finish.
///
/// In dry-run mode the command line is printed and [`ToolStatus::Skipped`]
/// returned without spawning anything.
pub fn deploy_snapshot(
    runner: &dyn CommandRunner,
    tool: &DeployTool,
    settings: &Path,
    pom: &Path,
    files: &[ClassifiedFile],
) -> Result<ToolStatus, DeployError> {
    let cmd = build_deploy_command(tool, settings, pom, files);
    if tool.dry_run {
        progress::status_info("Would run", &cmd.to_string());
        return Ok(ToolStatus::Skipped);
    }
    runner.run(&cmd)
}
