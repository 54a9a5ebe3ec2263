use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all snapdeploy operations.
#[derive(Debug, Error, Diagnostic)]
pub enum DeployError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required configuration value (usually an environment variable) is absent.
    #[error("Missing required configuration: {name}")]
    ConfigurationMissing {
        name: String,
        #[help]
        hint: String,
    },

    /// An environment variable is set but does not hold valid UTF-8.
    #[error("Environment variable {name} is not valid UTF-8")]
    InvalidEnvironment { name: String },

    /// The configuration file could not be read or parsed.
    #[error("Configuration error: {message}")]
    #[diagnostic(help("Check snapdeploy.toml for syntax errors"))]
    Config { message: String },

    /// A file that must be freshly created already exists.
    #[error("Refusing to overwrite existing file: {}", path.display())]
    CreationConflict { path: PathBuf },

    /// The bundle archive could not be unpacked.
    #[error("Extraction failed for {artifact}: {reason}")]
    ExtractionFailed { artifact: String, reason: String },

    /// The external deploy tool reported failure.
    #[error("Deploy failed for {artifact}: {reason}")]
    DeployFailed { artifact: String, reason: String },

    /// An external program could not be started at all.
    #[error("Failed to execute {program}: {message}")]
    Process { program: String, message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

impl DeployError {
    /// A missing environment variable.
    pub fn missing_env(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::ConfigurationMissing {
            hint: format!("Export {name} before running snapdeploy"),
            name,
        }
    }
}

/// Convenience alias for `miette::Result<T>`.
pub type DeployResult<T> = miette::Result<T>;
