//! Mapping from extracted jars to `deploy:deploy-file` file arguments.

use std::path::{Path, PathBuf};

/// Classifier table: file-name suffix and the deploy argument it feeds.
///
/// Order matters: main jar first, then sources, then javadoc.
pub const CLASSIFIERS: &[(&str, &str)] = &[
    ("", "-Dfile"),
    ("-sources", "-Dsources"),
    ("-javadoc", "-Djavadoc"),
];

/// One extracted file that exists on disk, paired with its deploy argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedFile {
    pub argument: &'static str,
    pub path: PathBuf,
}

impl ClassifiedFile {
    /// The `-D{name}=<path>` token passed to the deploy tool.
    pub fn to_arg(&self) -> String {
        format!("{}={}", self.argument, self.path.display())
    }
}

/// Base file name shared by every file of an artifact: `{artifact}-{version}`.
pub fn base_name(artifact: &str, version: &str) -> String {
    format!("{artifact}-{version}")
}

/// Path of the POM descriptor inside an extracted bundle.
pub fn pom_path(artifact: &str, version: &str, dir: &Path) -> PathBuf {
    dir.join(format!("{}.pom", base_name(artifact, version)))
}

/// Return the classified files present in `dir`, in table order.
///
/// A missing file is simply left out.
pub fn resolve_classified_files(artifact: &str, version: &str, dir: &Path) -> Vec<ClassifiedFile> {
    let base = base_name(artifact, version);
    CLASSIFIERS
        .iter()
        .filter_map(|&(suffix, argument)| {
            let path = dir.join(format!("{base}{suffix}.jar"));
            if path.is_file() {
                Some(ClassifiedFile { argument, path })
            } else {
                tracing::debug!("No {argument} file for {artifact} at {}", path.display());
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"PK").unwrap();
    }

    #[test]
    fn only_main_jar() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "pkg-a-1.0-SNAPSHOT.jar");

        let files = resolve_classified_files("pkg-a", "1.0-SNAPSHOT", tmp.path());
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].argument, "-Dfile");
        assert_eq!(files[0].path, tmp.path().join("pkg-a-1.0-SNAPSHOT.jar"));
    }

    #[test]
    fn all_three_in_table_order() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "pkg-a-1.0-SNAPSHOT-javadoc.jar");
        touch(tmp.path(), "pkg-a-1.0-SNAPSHOT-sources.jar");
        touch(tmp.path(), "pkg-a-1.0-SNAPSHOT.jar");

        let args: Vec<_> = resolve_classified_files("pkg-a", "1.0-SNAPSHOT", tmp.path())
            .iter()
            .map(|f| f.argument)
            .collect();
        assert_eq!(args, vec!["-Dfile", "-Dsources", "-Djavadoc"]);
    }

    #[test]
    fn empty_dir_resolves_nothing() {
        let tmp = TempDir::new().unwrap();
        assert!(resolve_classified_files("pkg-a", "1.0-SNAPSHOT", tmp.path()).is_empty());
    }

    #[test]
    fn other_artifacts_and_versions_ignored() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "pkg-b-1.0-SNAPSHOT.jar");
        touch(tmp.path(), "pkg-a-2.0-SNAPSHOT.jar");
        assert!(resolve_classified_files("pkg-a", "1.0-SNAPSHOT", tmp.path()).is_empty());
    }

    #[test]
    fn directory_with_jar_name_is_not_a_file() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("pkg-a-1.0-SNAPSHOT.jar")).unwrap();
        assert!(resolve_classified_files("pkg-a", "1.0-SNAPSHOT", tmp.path()).is_empty());
    }

    #[test]
    fn to_arg_joins_with_equals() {
        let file = ClassifiedFile {
            argument: "-Dsources",
            path: PathBuf::from("/x/pkg-a-1.0-SNAPSHOT-sources.jar"),
        };
        assert_eq!(file.to_arg(), "-Dsources=/x/pkg-a-1.0-SNAPSHOT-sources.jar");
    }

    #[test]
    fn pom_path_uses_base_name() {
        let pom = pom_path("pkg-a", "1.0-SNAPSHOT", Path::new("/x"));
        assert_eq!(pom, PathBuf::from("/x/pkg-a-1.0-SNAPSHOT.pom"));
    }
}
