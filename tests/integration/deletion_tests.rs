use dup::cli::OutputFormat;
use dup::config::ScanOptions;
use dup::duplicates::FinderConfig;
use dup::error::{exit_code_for, DupError, ExitCode};
use std::fs;
use std::io::{self, BufReader, Cursor, Read};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tempfile::{tempdir, TempDir};

fn setup() -> TempDir {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), b"abc").unwrap();
    fs::write(dir.path().join("b"), b"abc").unwrap();
    fs::write(dir.path().join("c"), b"xyz").unwrap();
    dir
}

fn options(dir: &Path) -> ScanOptions {
    ScanOptions {
        dirs: vec![dir.to_path_buf()],
        cross: false,
        recursive: false,
        chunk_size: 1024,
        output: OutputFormat::Table,
        trash: false,
        assume_yes: false,
        dry_run: false,
        table_width: None,
    }
}

fn run(options: &ScanOptions, answer: &str) -> (ExitCode, String) {
    let mut input = Cursor::new(answer.as_bytes().to_vec());
    let mut output = Vec::new();
    let code = dup::run(options, &FinderConfig::default(), &mut input, &mut output).unwrap();
    (code, String::from_utf8(output).unwrap())
}

#[test]
fn test_confirmed_deletion_removes_duplicates_only() {
    let dir = setup();
    let (code, out) = run(&options(dir.path()), "y\n");

    assert_eq!(code, ExitCode::Success);
    assert!(out.contains("Found 1 duplicate files."));
    assert!(out.contains("Delete duplicates? [y/N] "));
    assert!(out.contains("Deleting 1 files..."));
    assert!(dir.path().join("a").exists());
    assert!(!dir.path().join("b").exists());
    assert!(dir.path().join("c").exists());
}

#[test]
fn test_empty_answer_keeps_files() {
    let dir = setup();
    let (code, out) = run(&options(dir.path()), "\n");

    assert_eq!(code, ExitCode::Success);
    assert!(out.contains("Not deleting."));
    assert!(dir.path().join("b").exists());
}

#[test]
fn test_end_of_input_keeps_files() {
    let dir = setup();
    let (_, out) = run(&options(dir.path()), "");

    assert!(out.contains("Not deleting."));
    assert!(dir.path().join("b").exists());
}

#[test]
fn test_no_duplicates_skips_prompt() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), b"one").unwrap();
    fs::write(dir.path().join("b"), b"two").unwrap();

    let (code, out) = run(&options(dir.path()), "y\n");
    assert_eq!(code, ExitCode::Success);
    assert_eq!(out, "No duplicate files found.\n");
}

#[test]
fn test_dry_run_never_prompts() {
    let dir = setup();
    let mut opts = options(dir.path());
    opts.dry_run = true;

    let (_, out) = run(&opts, "y\n");
    assert!(!out.contains("Delete duplicates?"));
    assert!(dir.path().join("b").exists());
}

#[test]
fn test_assume_yes_deletes_without_prompt() {
    let dir = setup();
    let mut opts = options(dir.path());
    opts.assume_yes = true;

    let (_, out) = run(&opts, "");
    assert!(!out.contains("Delete duplicates?"));
    assert!(!dir.path().join("b").exists());
}

#[test]
fn test_json_output_does_not_prompt_or_delete() {
    let dir = setup();
    let mut opts = options(dir.path());
    opts.output = OutputFormat::Json;

    let (_, out) = run(&opts, "y\n");
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();

    assert_eq!(value["duplicates"].as_array().unwrap().len(), 1);
    assert_eq!(value["summary"]["duplicate_files"], 1);
    assert!(dir.path().join("b").exists());
}

#[test]
fn test_repeated_directory_never_deletes_only_copy() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("only"), b"abc").unwrap();

    let mut opts = options(dir.path());
    opts.dirs = vec![dir.path().to_path_buf(), dir.path().to_path_buf()];
    opts.assume_yes = true;

    let (code, out) = run(&opts, "");
    assert_eq!(code, ExitCode::Success);
    assert_eq!(out, "No duplicate files found.\n");
    assert!(dir.path().join("only").exists());
}

#[test]
fn test_overlapping_recursive_roots_keep_one_copy() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();
    fs::write(sub.join("inner"), b"abc").unwrap();
    fs::write(dir.path().join("top"), b"abc").unwrap();

    let mut opts = options(dir.path());
    opts.dirs = vec![dir.path().to_path_buf(), sub.clone()];
    opts.recursive = true;
    opts.assume_yes = true;

    let finder = FinderConfig::default().with_recursive(true);
    let mut output = Vec::new();
    dup::run(&opts, &finder, &mut Cursor::new(Vec::new()), &mut output).unwrap();

    // sub/inner sorts first, so top is the one deleted
    assert!(sub.join("inner").exists());
    assert!(!dir.path().join("top").exists());
}

/// Input that raises the shutdown flag while the prompt waits, then answers.
struct InterruptingInput {
    flag: Arc<AtomicBool>,
    answer: Cursor<Vec<u8>>,
}

impl Read for InterruptingInput {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.flag.store(true, Ordering::SeqCst);
        self.answer.read(buf)
    }
}

#[test]
fn test_ctrl_c_at_prompt_deletes_nothing() {
    let dir = setup();
    let flag = Arc::new(AtomicBool::new(false));
    let finder = FinderConfig::default().with_shutdown_flag(Arc::clone(&flag));
    let mut input = BufReader::new(InterruptingInput {
        flag,
        answer: Cursor::new(b"y\n".to_vec()),
    });
    let mut output = Vec::new();

    let err = dup::run(&options(dir.path()), &finder, &mut input, &mut output).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<DupError>(),
        Some(DupError::Interrupted)
    ));
    assert_eq!(exit_code_for(&err).as_i32(), 130);
    assert!(dir.path().join("b").exists());
}
