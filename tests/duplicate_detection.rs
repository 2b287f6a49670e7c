mod common;

use common::{create_file, get_all_filenames, scan_json};
use tempfile::TempDir;

const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

#[test]
fn test_hello_world_directory() {
    let dir = TempDir::new().unwrap();
    create_file(dir.path(), "a.txt", b"hello");
    create_file(dir.path(), "b.txt", b"hello");
    create_file(dir.path(), "c.txt", b"world");

    let json = scan_json(dir.path(), &[]);

    let groups = json["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["fingerprint"], HELLO_SHA256);
    assert_eq!(get_all_filenames(&json), ["a.txt", "b.txt"]);
    assert_eq!(json["stats"]["total_files"], 3);
    assert_eq!(json["stats"]["wasted_bytes"], 5);
}

#[test]
fn test_handles_different_files() {
    let dir = TempDir::new().unwrap();
    create_file(dir.path(), "a.txt", b"content a");
    create_file(dir.path(), "b.txt", b"content b");

    let json = scan_json(dir.path(), &[]);

    assert_eq!(json["groups"].as_array().unwrap().len(), 0);
    assert_eq!(json["stats"]["duplicate_files"], 0);
}

#[test]
fn test_large_files_detected() {
    let dir = TempDir::new().unwrap();
    // Several hashing blocks each
    let large_content: Vec<u8> = (0..300 * 1024).map(|i| (i % 253) as u8).collect();
    create_file(dir.path(), "large_a.bin", &large_content);
    create_file(dir.path(), "large_b.bin", &large_content);

    let json = scan_json(dir.path(), &[]);

    assert_eq!(json["groups"].as_array().unwrap().len(), 1);
    assert_eq!(json["groups"][0]["size"], large_content.len() as u64);
}

#[test]
fn test_late_difference_not_grouped() {
    let dir = TempDir::new().unwrap();
    let mut content = vec![b'X'; 200 * 1024];
    create_file(dir.path(), "a.bin", &content);
    content[150 * 1024] = b'Y';
    create_file(dir.path(), "b.bin", &content);

    let json = scan_json(dir.path(), &[]);

    assert!(json["groups"].as_array().unwrap().is_empty());
}

#[test]
fn test_multiple_duplicate_groups() {
    let dir = TempDir::new().unwrap();
    let content1 = b"group one content";
    let content2 = b"group two content!";
    create_file(dir.path(), "group1_a.txt", content1);
    create_file(dir.path(), "group1_b.txt", content1);
    create_file(dir.path(), "group2_a.txt", content2);
    create_file(dir.path(), "group2_b.txt", content2);

    let json = scan_json(dir.path(), &[]);
    let groups = json["groups"].as_array().unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(json["stats"]["duplicate_groups"], 2);
    assert_eq!(json["stats"]["duplicate_files"], 4);

    let expected_wasted = content1.len() + content2.len();
    assert_eq!(json["stats"]["wasted_bytes"], expected_wasted as u64);

    // Groups come out in walk order
    assert_eq!(groups[0]["size"], content1.len() as u64);
    assert_eq!(groups[1]["size"], content2.len() as u64);
}

#[test]
fn test_three_way_duplicates() {
    let dir = TempDir::new().unwrap();
    create_file(dir.path(), "a.txt", b"triple duplicate");
    create_file(dir.path(), "b.txt", b"triple duplicate");
    create_file(dir.path(), "c.txt", b"triple duplicate");

    let json = scan_json(dir.path(), &[]);

    assert_eq!(json["groups"].as_array().unwrap().len(), 1);
    assert_eq!(json["stats"]["duplicate_files"], 3);
    // Wasted space should be 2 * file_size (3 files, only 1 needed)
    let wasted = json["stats"]["wasted_bytes"].as_u64().unwrap();
    assert_eq!(wasted, 2 * b"triple duplicate".len() as u64);
}

#[test]
fn test_blake3_algorithm() {
    let dir = TempDir::new().unwrap();
    create_file(dir.path(), "a.txt", b"hello");
    create_file(dir.path(), "b.txt", b"hello");

    let json = scan_json(dir.path(), &["--algorithm", "blake3"]);

    let fingerprint = json["groups"][0]["fingerprint"].as_str().unwrap();
    assert_eq!(fingerprint, blake3::hash(b"hello").to_hex().as_str());
    assert_ne!(fingerprint, HELLO_SHA256);
}

#[test]
fn test_verify_and_block_size_do_not_change_result() {
    let dir = TempDir::new().unwrap();
    create_file(dir.path(), "a.txt", b"hello");
    create_file(dir.path(), "b.txt", b"hello");
    create_file(dir.path(), "c.txt", b"world");

    let json = scan_json(dir.path(), &["--verify", "--block-size", "2"]);

    assert_eq!(json["groups"][0]["fingerprint"], HELLO_SHA256);
    assert_eq!(get_all_filenames(&json), ["a.txt", "b.txt"]);
}
