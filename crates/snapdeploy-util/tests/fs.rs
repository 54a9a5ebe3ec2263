use snapdeploy_util::errors::DeployError;
use snapdeploy_util::fs::{with_scoped_temp_dir, ScopedTempDir};
use tempfile::TempDir;

fn entries(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

#[test]
fn test_scoped_dir_is_empty_and_removed_after_body() {
    let tmp = TempDir::new().unwrap();
    let mut seen = None;

    let value = with_scoped_temp_dir(Some(tmp.path()), "scope-", |dir| {
        assert!(dir.is_dir());
        assert_eq!(entries(dir), 0);
        std::fs::create_dir_all(dir.join("nested")).unwrap();
        std::fs::write(dir.join("nested").join("file.jar"), "x").unwrap();
        seen = Some(dir.to_path_buf());
        Ok(42)
    })
    .unwrap();

    assert_eq!(value, 42);
    assert!(!seen.unwrap().exists());
    assert_eq!(entries(tmp.path()), 0);
}

#[test]
fn test_scoped_dir_removed_when_body_fails() {
    let tmp = TempDir::new().unwrap();

    let result: miette::Result<()> = with_scoped_temp_dir(Some(tmp.path()), "scope-", |dir| {
        std::fs::write(dir.join("partial"), "x").unwrap();
        Err(DeployError::Generic {
            message: "body failed".to_string(),
        }
        .into())
    });

    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "body failed");
    assert_eq!(entries(tmp.path()), 0);
}

#[test]
fn test_scoped_dir_removed_when_body_panics() {
    let tmp = TempDir::new().unwrap();
    let parent = tmp.path().to_path_buf();

    let outcome = std::panic::catch_unwind(|| {
        let _: miette::Result<()> = with_scoped_temp_dir(Some(parent.as_path()), "scope-", |_| {
            panic!("boom");
        });
    });

    assert!(outcome.is_err());
    assert_eq!(entries(tmp.path()), 0);
}

#[test]
fn test_scoped_dirs_are_unique() {
    let tmp = TempDir::new().unwrap();
    let a = ScopedTempDir::new(Some(tmp.path()), "scope-").unwrap();
    let b = ScopedTempDir::new(Some(tmp.path()), "scope-").unwrap();
    assert_ne!(a.path(), b.path());
    assert!(a.path().file_name().unwrap().to_string_lossy().starts_with("scope-"));
    a.close();
    b.close();
    assert_eq!(entries(tmp.path()), 0);
}

#[test]
fn test_creation_failure_skips_body() {
    let tmp = TempDir::new().unwrap();
    let missing_parent = tmp.path().join("does-not-exist");
    let mut ran = false;

    let result = with_scoped_temp_dir(Some(missing_parent.as_path()), "scope-", |_| {
        ran = true;
        Ok(())
    });

    assert!(result.is_err());
    assert!(!ran);
}

#[test]
fn test_cleanup_failure_is_not_fatal() {
    let tmp = TempDir::new().unwrap();

    let value = with_scoped_temp_dir(Some(tmp.path()), "scope-", |dir| {
        std::fs::remove_dir_all(dir).unwrap();
        Ok(7)
    })
    .unwrap();

    assert_eq!(value, 7);
    assert_eq!(entries(tmp.path()), 0);
}
