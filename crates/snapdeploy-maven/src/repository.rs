//! Snapshot repository target: the server id and URL handed to the deploy tool.

use snapdeploy_core::config::{RepositoryConfig, DEFAULT_REPOSITORY_ID, DEFAULT_SNAPSHOT_URL};

/// A remote snapshot repository.
///
/// `id` must match the `<server><id>` entry of the generated settings so the
/// deploy tool picks up the credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRepository {
    pub id: String,
    pub url: String,
}

impl SnapshotRepository {
    /// Build a `SnapshotRepository` from the `[repository]` config section.
    pub fn from_config(config: &RepositoryConfig) -> Self {
        Self {
            id: config.id.clone(),
            url: config.url.trim_end_matches('/').to_string(),
        }
    }

    /// The Sonatype OSS snapshot repository.
    pub fn sonatype() -> Self {
        Self {
            id: DEFAULT_REPOSITORY_ID.to_string(),
            url: DEFAULT_SNAPSHOT_URL.to_string(),
        }
    }
}
