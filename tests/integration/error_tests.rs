use dup::duplicates::{find_duplicates, FinderConfig};
use dup::error::{DupError, ExitCode};
use dup::scanner::ScanError;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tempfile::tempdir;

#[test]
fn test_no_directories_is_invalid() {
    let result = find_duplicates(&[], &FinderConfig::default());
    match result {
        Err(err @ DupError::InvalidArguments(_)) => {
            assert_eq!(err.exit_code(), ExitCode::InvalidArguments);
            assert_eq!(err.exit_code().as_i32(), 1);
        }
        other => panic!("Expected InvalidArguments, got {:?}", other),
    }
}

#[test]
fn test_cross_with_single_directory_is_invalid() {
    let dir = tempdir().unwrap();
    File::create(dir.path().join("only"))
        .unwrap()
        .write_all(b"abc")
        .unwrap();

    let result = find_duplicates(
        &[dir.path().to_path_buf()],
        &FinderConfig::default().with_cross(true),
    );
    assert!(matches!(result, Err(DupError::InvalidArguments(_))));
}

#[test]
fn test_missing_directory_aborts_run() {
    let dir = tempdir().unwrap();
    let dirs = vec![
        dir.path().to_path_buf(),
        PathBuf::from("/non/existent/path/12345"),
    ];

    let result = find_duplicates(&dirs, &FinderConfig::default());
    match result {
        Err(DupError::Traversal(ScanError::NotFound(path))) => {
            assert!(path.to_string_lossy().contains("non/existent/path/12345"));
        }
        other => panic!("Expected Traversal(NotFound), got {:?}", other),
    }
}

#[test]
fn test_file_instead_of_directory() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("file.txt");
    File::create(&file).unwrap();

    let result = find_duplicates(&[file], &FinderConfig::default());
    assert!(matches!(
        result,
        Err(DupError::Traversal(ScanError::NotADirectory(_)))
    ));
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_aborts_comparison() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let locked = dir.path().join("b_locked");
    File::create(dir.path().join("a"))
        .unwrap()
        .write_all(b"abc")
        .unwrap();
    File::create(&locked).unwrap().write_all(b"abc").unwrap();

    let mut perms = std::fs::metadata(&locked).unwrap().permissions();
    perms.set_mode(0o000);
    std::fs::set_permissions(&locked, perms).unwrap();

    // Root can still open the file; nothing to test in that case
    if File::open(&locked).is_ok() {
        return;
    }

    let result = find_duplicates(&[dir.path().to_path_buf()], &FinderConfig::default());
    match result {
        Err(DupError::Compare(err)) => assert_eq!(err.path(), locked.as_path()),
        other => panic!("Expected Compare error, got {:?}", other),
    }
}

#[test]
fn test_shutdown_flag_interrupts_run() {
    let dir = tempdir().unwrap();
    File::create(dir.path().join("a")).unwrap();
    File::create(dir.path().join("b")).unwrap();

    let config = FinderConfig::default().with_shutdown_flag(Arc::new(AtomicBool::new(true)));
    let result = find_duplicates(&[dir.path().to_path_buf()], &config);

    match result {
        Err(err @ DupError::Interrupted) => assert_eq!(err.exit_code().as_i32(), 130),
        other => panic!("Expected Interrupted, got {:?}", other),
    }
}
