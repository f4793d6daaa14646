// Unit tests for logger module initialization logic

use crate::logger::{LOG_FILE_NAME, build_dispatch, initialize};

use std::path::PathBuf;

use tempfile::TempDir;

/// **VALUE**: Verifies that calling initialize() multiple times doesn't panic or fail.
///
/// **WHY THIS MATTERS**: A second global logger install panics inside `log`;
/// startup code and tests may both reach initialize().
///
/// **BUG THIS CATCHES**: Would catch if the Once or AtomicBool guards are removed.
#[test]
fn given_logger_initialized_when_called_again_then_returns_ok() {
    let temp_dir = TempDir::new().unwrap();

    let result1 = initialize(temp_dir.path());
    let result2 = initialize(temp_dir.path());

    assert!(result1.is_ok(), "First initialization should succeed");
    assert!(result2.is_ok(), "Second initialization should be a no-op");
}

/// **VALUE**: Verifies an unwritable log directory is an error, not a panic.
///
/// **BUG THIS CATCHES**: Would catch `fern::log_file()` being unwrapped.
#[test]
fn given_invalid_log_dir_when_building_dispatch_then_returns_error() {
    let invalid_dir = PathBuf::from("/dev/null/invalid-path");

    let result = build_dispatch(&invalid_dir);

    let err = result.err().expect("Should fail for an invalid log directory");
    assert!(format!("{err:?}").contains("Subway"));
    assert!(err.message().contains(LOG_FILE_NAME));
}

#[test]
fn given_writable_dir_when_building_dispatch_then_log_file_created() {
    let temp_dir = TempDir::new().unwrap();

    let dispatch = build_dispatch(temp_dir.path());

    assert!(dispatch.is_ok());
    assert!(temp_dir.path().join(LOG_FILE_NAME).exists());
}
