use std::path::PathBuf;

use snapdeploy_util::errors::DeployError;

#[test]
fn test_io_error_display() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
    let err = DeployError::from(io_err);
    assert!(err.to_string().contains("I/O error"), "got: {err}");
}

#[test]
fn test_configuration_missing_names_variable() {
    let err = DeployError::missing_env("SONATYPE_USERNAME");
    assert_eq!(
        err.to_string(),
        "Missing required configuration: SONATYPE_USERNAME"
    );
    let help = miette::Diagnostic::help(&err).unwrap().to_string();
    assert!(help.contains("SONATYPE_USERNAME"), "got: {help}");
}

#[test]
fn test_invalid_environment_display() {
    let err = DeployError::InvalidEnvironment {
        name: "SONATYPE_PASSWORD".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Environment variable SONATYPE_PASSWORD is not valid UTF-8"
    );
}

#[test]
fn test_creation_conflict_display() {
    let err = DeployError::CreationConflict {
        path: PathBuf::from("/tmp/x/settings.xml"),
    };
    assert_eq!(
        err.to_string(),
        "Refusing to overwrite existing file: /tmp/x/settings.xml"
    );
}

#[test]
fn test_extraction_failed_display() {
    let err = DeployError::ExtractionFailed {
        artifact: "pkg-a".to_string(),
        reason: "exited with code 9".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Extraction failed for pkg-a: exited with code 9"
    );
}

#[test]
fn test_deploy_failed_display() {
    let err = DeployError::DeployFailed {
        artifact: "pkg-b".to_string(),
        reason: "exited with code 1".to_string(),
    };
    assert_eq!(err.to_string(), "Deploy failed for pkg-b: exited with code 1");
}

#[test]
fn test_process_error_display() {
    let err = DeployError::Process {
        program: "mvn".to_string(),
        message: "not found".to_string(),
    };
    assert_eq!(err.to_string(), "Failed to execute mvn: not found");
}

#[test]
fn test_io_error_from_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err: DeployError = io_err.into();
    assert!(matches!(err, DeployError::Io(_)));
}
