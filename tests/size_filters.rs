mod common;

use common::{create_file, get_all_filenames, scan_json};
use tempfile::TempDir;

fn create_sized_pairs(dir: &std::path::Path) {
    create_file(dir, "tiny_a.txt", b"tiny"); // 4 bytes
    create_file(dir, "tiny_b.txt", b"tiny");
    create_file(dir, "medium_a.txt", b"medium content"); // 14 bytes
    create_file(dir, "medium_b.txt", b"medium content");
    create_file(dir, "huge_a.txt", b"this is a huge file content"); // 27 bytes
    create_file(dir, "huge_b.txt", b"this is a huge file content");
}

#[test]
fn test_min_size_filter() {
    let dir = TempDir::new().unwrap();
    create_sized_pairs(dir.path());

    let json = scan_json(dir.path(), &["--min-size", "20"]);

    assert_eq!(json["stats"]["total_files"], 2);
    assert_eq!(json["groups"].as_array().unwrap().len(), 1);
    let filenames = get_all_filenames(&json);
    assert_eq!(filenames, ["huge_a.txt", "huge_b.txt"]);
}

#[test]
fn test_max_size_filter() {
    let dir = TempDir::new().unwrap();
    create_sized_pairs(dir.path());

    let json = scan_json(dir.path(), &["--max-size", "10"]);

    assert_eq!(json["stats"]["duplicate_files"], 2);
    let filenames = get_all_filenames(&json);
    assert_eq!(filenames, ["tiny_a.txt", "tiny_b.txt"]);
}

#[test]
fn test_size_filter_combined() {
    let dir = TempDir::new().unwrap();
    create_sized_pairs(dir.path());

    let json = scan_json(dir.path(), &["-s", "5", "--max-size", "20"]);

    assert_eq!(json["groups"].as_array().unwrap().len(), 1);
    assert_eq!(json["stats"]["duplicate_files"], 2);
    let filenames = get_all_filenames(&json);
    assert_eq!(filenames, ["medium_a.txt", "medium_b.txt"]);
}

#[test]
fn test_bounds_are_inclusive() {
    let dir = TempDir::new().unwrap();
    create_sized_pairs(dir.path());

    let json = scan_json(dir.path(), &["--min-size", "14", "--max-size", "14"]);

    assert_eq!(json["stats"]["total_files"], 2);
}
