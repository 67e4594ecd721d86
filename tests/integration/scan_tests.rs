use dup::duplicates::{find_duplicates, FinderConfig};
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tempfile::tempdir;

fn write(path: &std::path::Path, content: &[u8]) {
    File::create(path).unwrap().write_all(content).unwrap();
}

#[test]
fn test_two_identical_files_in_one_directory() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("f1"), b"abc");
    write(&dir.path().join("f2"), b"abc");

    let (records, summary) =
        find_duplicates(&[dir.path().to_path_buf()], &FinderConfig::default()).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].duplicate, dir.path().join("f2"));
    assert_eq!(records[0].original, dir.path().join("f1"));
    assert_eq!(summary.total_files, 2);
    assert_eq!(summary.resolve.comparisons, 1);
}

#[test]
fn test_different_sizes_compared_without_reading() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("short"), b"abc");
    write(&dir.path().join("long"), b"abcdefghij");

    let (records, summary) =
        find_duplicates(&[dir.path().to_path_buf()], &FinderConfig::default()).unwrap();

    assert!(records.is_empty());
    assert_eq!(summary.compare.comparisons, 1);
    assert_eq!(summary.compare.size_mismatches, 1);
    assert_eq!(summary.compare.bytes_read, 0);
}

#[test]
fn test_non_recursive_ignores_subdirectories() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();
    write(&dir.path().join("a"), b"same");
    write(&sub.join("b"), b"same");

    let (records, summary) =
        find_duplicates(&[dir.path().to_path_buf()], &FinderConfig::default()).unwrap();
    assert!(records.is_empty());
    assert_eq!(summary.total_files, 1);

    let config = FinderConfig::default().with_recursive(true);
    let (records, summary) = find_duplicates(&[dir.path().to_path_buf()], &config).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].duplicate, sub.join("b"));
    assert_eq!(summary.total_files, 2);
}

#[test]
fn test_triplicate_reports_two_records_against_first() {
    let dir = tempdir().unwrap();
    for name in ["a", "b", "c"] {
        write(&dir.path().join(name), b"triple");
    }
    write(&dir.path().join("d"), b"single");

    let (records, summary) =
        find_duplicates(&[dir.path().to_path_buf()], &FinderConfig::default()).unwrap();

    let pairs: Vec<(PathBuf, PathBuf)> = records
        .into_iter()
        .map(|r| (r.duplicate, r.original))
        .collect();
    assert_eq!(
        pairs,
        vec![
            (dir.path().join("b"), dir.path().join("a")),
            (dir.path().join("c"), dir.path().join("a")),
        ]
    );
    // 6 pairs; (b,c) (b,d) (c,d) involve a marked file and are skipped
    assert_eq!(summary.resolve.pairs_seen, 6);
    assert_eq!(summary.resolve.pairs_skipped, 3);
}

#[test]
fn test_large_file_across_many_chunks() {
    let dir = tempdir().unwrap();
    let content: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
    write(&dir.path().join("one"), &content);
    write(&dir.path().join("two"), &content);

    let mut different = content.clone();
    different[199_999] ^= 0xff;
    write(&dir.path().join("three"), &different);

    let config = FinderConfig::default().with_chunk_size(4096);
    let (records, _) = find_duplicates(&[dir.path().to_path_buf()], &config).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].duplicate, dir.path().join("two"));
    assert_eq!(records[0].original, dir.path().join("one"));
}

#[test]
fn test_empty_files_are_duplicates_of_each_other() {
    let dir = tempdir().unwrap();
    File::create(dir.path().join("empty1")).unwrap();
    File::create(dir.path().join("empty2")).unwrap();

    let (records, _) =
        find_duplicates(&[dir.path().to_path_buf()], &FinderConfig::default()).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].duplicate, dir.path().join("empty2"));
}

#[test]
fn test_repeated_runs_are_identical() {
    let dir = tempdir().unwrap();
    for (name, content) in [("a", "x"), ("b", "y"), ("c", "x"), ("d", "y"), ("e", "z")] {
        write(&dir.path().join(name), content.as_bytes());
    }

    let dirs = [dir.path().to_path_buf()];
    let (first, _) = find_duplicates(&dirs, &FinderConfig::default()).unwrap();
    let (second, _) = find_duplicates(&dirs, &FinderConfig::default()).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn test_nested_root_never_matches_file_to_itself() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();
    write(&sub.join("lonely"), b"no twin");

    let dirs = [dir.path().to_path_buf(), sub];
    let config = FinderConfig::default().with_recursive(true);
    let (records, summary) = find_duplicates(&dirs, &config).unwrap();

    assert!(records.is_empty());
    assert_eq!(summary.total_files, 1);
}
