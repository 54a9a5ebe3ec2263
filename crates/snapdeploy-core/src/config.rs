use std::env::VarError;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use snapdeploy_util::errors::DeployError;

/// Environment variable holding the repository username.
pub const USERNAME_VAR: &str = "SONATYPE_USERNAME";

/// Environment variable holding the repository password.
pub const PASSWORD_VAR: &str = "SONATYPE_PASSWORD";

/// Default config file name, looked up in the invocation root.
pub const CONFIG_FILE_NAME: &str = "snapdeploy.toml";

/// Server id shared by the generated settings and the deploy command.
pub const DEFAULT_REPOSITORY_ID: &str = "snapshot-repo-id";

/// Sonatype OSS snapshot repository.
pub const DEFAULT_SNAPSHOT_URL: &str = "https://oss.sonatype.org/content/repositories/snapshots";

/// Location of the bundle archive the build produces for `artifact`.
pub fn bundle_path(bundle_root: &Path, artifact: &str) -> PathBuf {
    bundle_root.join(format!("{artifact}_bundle.jar"))
}

/// Repository login, read once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Resolve both credentials through `lookup`.
    ///
    /// Fails with [`DeployError::ConfigurationMissing`] naming the first
    /// variable that is absent or empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DeployError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::try_from_lookup(|name| Ok(lookup(name)))
    }

    /// Like [`Credentials::from_lookup`], for lookups that can themselves fail.
    pub fn try_from_lookup<F>(lookup: F) -> Result<Self, DeployError>
    where
        F: Fn(&str) -> Result<Option<String>, DeployError>,
    {
        let required = |name: &str| {
            lookup(name)?
                .filter(|v| !v.is_empty())
                .ok_or_else(|| DeployError::missing_env(name))
        };
        let username = required(USERNAME_VAR)?;
        let password = required(PASSWORD_VAR)?;
        Ok(Self { username, password })
    }

    /// Resolve credentials from the process environment.
    pub fn from_env() -> Result<Self, DeployError> {
        Self::try_from_lookup(|name| match std::env::var(name) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => Err(DeployError::InvalidEnvironment {
                name: name.to_string(),
            }),
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

/// What to do when an external tool reports failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Log a warning and carry on with the next step.
    #[default]
    Continue,
    /// Stop the run with an error.
    Abort,
}

impl std::str::FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "continue" => Ok(Self::Continue),
            "abort" => Ok(Self::Abort),
            other => Err(format!(
                "unknown failure policy '{other}' (expected 'continue' or 'abort')"
            )),
        }
    }
}

/// How bundle archives are unpacked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractorKind {
    /// Spawn the external extraction tool (`unzip` by default).
    #[default]
    External,
    /// Unpack in-process.
    Builtin,
}

/// Target repository from `[repository]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    #[serde(default = "default_repository_id")]
    pub id: String,
    #[serde(default = "default_snapshot_url")]
    pub url: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            id: default_repository_id(),
            url: default_snapshot_url(),
        }
    }
}

fn default_repository_id() -> String {
    DEFAULT_REPOSITORY_ID.to_string()
}

fn default_snapshot_url() -> String {
    DEFAULT_SNAPSHOT_URL.to_string()
}

/// External programs from `[tools]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolsConfig {
    #[serde(default = "default_deploy_tool")]
    pub deploy: String,
    #[serde(default = "default_extract_tool")]
    pub extract: String,
    #[serde(default)]
    pub extractor: ExtractorKind,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            deploy: default_deploy_tool(),
            extract: default_extract_tool(),
            extractor: ExtractorKind::default(),
        }
    }
}

fn default_deploy_tool() -> String {
    "mvn".to_string()
}

fn default_extract_tool() -> String {
    "unzip".to_string()
}

/// Everything a deploy run needs apart from credentials.
///
/// Loaded from `snapdeploy.toml` when present; CLI flags are applied on top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DeployConfig {
    /// Artifact identifiers, deployed in this order.
    #[serde(default)]
    pub artifacts: Vec<String>,

    /// Directory holding `{id}_bundle.jar` archives, relative to the invocation root.
    #[serde(default = "default_bundle_root")]
    pub bundle_root: PathBuf,

    /// Version embedded in the extracted file names.
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default)]
    pub on_tool_failure: FailurePolicy,

    #[serde(default)]
    pub repository: RepositoryConfig,

    #[serde(default)]
    pub tools: ToolsConfig,

    /// Parent for scratch directories; the system temp dir when unset.
    #[serde(default)]
    pub scratch_root: Option<PathBuf>,

    /// Log deploy commands instead of running them.
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            artifacts: Vec::new(),
            bundle_root: default_bundle_root(),
            version: default_version(),
            on_tool_failure: FailurePolicy::default(),
            repository: RepositoryConfig::default(),
            tools: ToolsConfig::default(),
            scratch_root: None,
            dry_run: false,
        }
    }
}

fn default_bundle_root() -> PathBuf {
    PathBuf::from("bazel-bin")
}

fn default_version() -> String {
    "1.0-SNAPSHOT".to_string()
}

impl DeployConfig {
    /// Create a config for the given artifact list with all other values defaulted.
    pub fn with_artifacts(artifacts: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            artifacts: artifacts.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Parse a config from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, DeployError> {
        toml::from_str(content).map_err(|e| DeployError::Config {
            message: format!("Failed to parse config: {e}"),
        })
    }

    /// Load a config file from `path`.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| DeployError::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Ok(Self::from_toml(&content)?)
    }

    /// Load `snapdeploy.toml` from `root`, or return defaults if the file doesn't exist.
    pub fn load(root: &Path) -> miette::Result<Self> {
        let path = root.join(CONFIG_FILE_NAME);
        if path.is_file() {
            tracing::debug!("Loading config from {}", path.display());
            Self::from_path(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Make `bundle_root` absolute against `root` if it is relative.
    pub fn anchor(&mut self, root: &Path) {
        if self.bundle_root.is_relative() {
            self.bundle_root = root.join(&self.bundle_root);
        }
    }

    /// Path of the bundle archive for `artifact`.
    pub fn bundle_path(&self, artifact: &str) -> PathBuf {
        bundle_path(&self.bundle_root, artifact)
    }

    /// Reject configs that cannot drive a run.
    pub fn validate(&self) -> Result<(), DeployError> {
        if self.artifacts.is_empty() {
            return Err(DeployError::ConfigurationMissing {
                name: "artifacts".to_string(),
                hint: format!(
                    "Add `artifacts = [\"...\"]` to {CONFIG_FILE_NAME} or pass --artifact <id>"
                ),
            });
        }
        if let Some(blank) = self.artifacts.iter().find(|a| a.trim().is_empty()) {
            return Err(DeployError::Config {
                message: format!("Invalid artifact identifier '{blank}'"),
            });
        }
        Ok(())
    }
}
