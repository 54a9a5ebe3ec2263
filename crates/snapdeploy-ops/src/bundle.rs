//! Bundle archive extraction.
//!
//! A bundle is the `{artifact}_bundle.jar` the build leaves under the bundle
//! root. By default it is unpacked with the external `unzip` tool; the
//! builtin backend reads it with the `zip` crate instead.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use snapdeploy_core::config::{self, DeployConfig, ExtractorKind};
use snapdeploy_util::errors::DeployError;
use snapdeploy_util::process::{CommandBuilder, CommandRunner, ToolStatus};

/// Where bundles live and how to unpack them.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub bundle_root: PathBuf,
    pub program: String,
    pub kind: ExtractorKind,
}

impl ExtractOptions {
    pub fn from_config(config: &DeployConfig) -> Self {
        Self {
            bundle_root: config.bundle_root.clone(),
            program: config.tools.extract.clone(),
            kind: config.tools.extractor,
        }
    }

    /// Path of the bundle archive for `artifact`.
    pub fn bundle_path(&self, artifact: &str) -> PathBuf {
        config::bundle_path(&self.bundle_root, artifact)
    }
}

/// Command line for the external extraction tool.
pub fn unzip_command(program: &str, bundle: &Path, dest: &Path) -> CommandBuilder {
    CommandBuilder::new(program)
        .arg("-q")
        .arg("-o")
        .arg(bundle.to_string_lossy().to_string())
        .arg("-d")
        .arg(dest.to_string_lossy().to_string())
}

/// Unpack the bundle of `artifact` into `dest`.
///
/// A missing archive or a failing tool is reported as [`ToolStatus::Failed`];
/// `Err` is reserved for the tool not being startable at all.
pub fn extract_bundle(
    runner: &dyn CommandRunner,
    options: &ExtractOptions,
    artifact: &str,
    dest: &Path,
) -> Result<ToolStatus, DeployError> {
    let bundle = options.bundle_path(artifact);
    if !bundle.is_file() {
        return Ok(ToolStatus::failed(format!(
            "bundle not found: {}",
            bundle.display()
        )));
    }

    tracing::debug!("Extracting {} into {}", bundle.display(), dest.display());
    match options.kind {
        ExtractorKind::External => runner.run(&unzip_command(&options.program, &bundle, dest)),
        ExtractorKind::Builtin => match unpack_zip(&bundle, dest) {
            Ok(count) => {
                tracing::debug!("Unpacked {count} entries from {}", bundle.display());
                Ok(ToolStatus::Success)
            }
            Err(e) => Ok(ToolStatus::failed(e.to_string())),
        },
    }
}

/// Extract a zip archive to `dest`, returning the number of files written.
///
/// Entries whose names would escape `dest` are skipped.
pub fn unpack_zip(archive_path: &Path, dest: &Path) -> Result<usize, DeployError> {
    let file = fs::File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| DeployError::Generic {
        message: format!("Failed to open zip {}: {e}", archive_path.display()),
    })?;

    let mut written = 0;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(|e| DeployError::Generic {
            message: format!("Zip entry error: {e}"),
        })?;

        let Some(relative) = entry.enclosed_name() else {
            tracing::warn!("Skipping unsafe zip entry '{}'", entry.name());
            continue;
        };
        let out_path = dest.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
        } else {
            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut buf = Vec::new();
            entry
                .read_to_end(&mut buf)
                .map_err(|e| DeployError::Generic {
                    message: format!("Failed to read zip entry: {e}"),
                })?;
            fs::write(&out_path, &buf)?;
            written += 1;
        }
    }
    Ok(written)
}
