use dup::duplicates::{find_duplicates, FinderConfig};
use std::fs::File;
use std::io::Write;
use tempfile::tempdir;

fn write(path: &std::path::Path, content: &[u8]) {
    let mut f = File::create(path).unwrap();
    f.write_all(content).unwrap();
    f.sync_all().unwrap();
}

#[test]
fn test_cross_duplicate_in_later_directory() {
    let a = tempdir().unwrap();
    let b = tempdir().unwrap();
    write(&a.path().join("f1"), b"abc");
    write(&b.path().join("f2"), b"abc");

    let dirs = vec![a.path().to_path_buf(), b.path().to_path_buf()];
    let (records, _) = find_duplicates(&dirs, &FinderConfig::default().with_cross(true)).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].duplicate, b.path().join("f2"));
    assert_eq!(records[0].original, a.path().join("f1"));
}

#[test]
fn test_cross_same_size_different_content() {
    let a = tempdir().unwrap();
    let b = tempdir().unwrap();
    write(&a.path().join("f1"), b"abc");
    write(&b.path().join("f2"), b"xyz");

    let dirs = vec![a.path().to_path_buf(), b.path().to_path_buf()];
    let (records, summary) =
        find_duplicates(&dirs, &FinderConfig::default().with_cross(true)).unwrap();

    assert!(records.is_empty());
    assert_eq!(summary.compare.content_mismatches, 1);
}

#[test]
fn test_cross_ignores_duplicates_within_a_directory() {
    let a = tempdir().unwrap();
    let b = tempdir().unwrap();
    write(&a.path().join("one"), b"same");
    write(&a.path().join("two"), b"same");
    write(&b.path().join("other"), b"different");

    let dirs = vec![a.path().to_path_buf(), b.path().to_path_buf()];

    let (records, summary) =
        find_duplicates(&dirs, &FinderConfig::default().with_cross(true)).unwrap();
    assert!(records.is_empty());
    assert_eq!(summary.resolve.pairs_seen, 2);

    let (records, _) = find_duplicates(&dirs, &FinderConfig::default()).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].duplicate, a.path().join("two"));
}

#[test]
fn test_three_directories_first_directory_wins() {
    let a = tempdir().unwrap();
    let b = tempdir().unwrap();
    let c = tempdir().unwrap();
    write(&a.path().join("1.txt"), b"triple");
    write(&b.path().join("2.txt"), b"triple");
    write(&c.path().join("3.txt"), b"triple");

    let dirs = vec![
        a.path().to_path_buf(),
        b.path().to_path_buf(),
        c.path().to_path_buf(),
    ];
    let (records, summary) =
        find_duplicates(&dirs, &FinderConfig::default().with_cross(true)).unwrap();

    assert_eq!(records.len(), 2);
    for record in &records {
        assert_eq!(record.original, a.path().join("1.txt"));
    }
    // (2.txt, 3.txt) is never compared
    assert_eq!(summary.resolve.comparisons, 2);
    assert_eq!(summary.resolve.pairs_skipped, 1);
}

#[test]
fn test_cross_with_same_directory_twice_finds_nothing() {
    let a = tempdir().unwrap();
    write(&a.path().join("only"), b"abc");

    let dirs = vec![a.path().to_path_buf(), a.path().to_path_buf()];
    let (records, summary) =
        find_duplicates(&dirs, &FinderConfig::default().with_cross(true)).unwrap();

    assert!(records.is_empty());
    assert_eq!(summary.total_files, 1);
    assert_eq!(summary.resolve.pairs_seen, 0);
}
