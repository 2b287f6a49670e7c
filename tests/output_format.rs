mod common;

use common::{create_file, dupescan, get_all_filenames, scan_json};
use predicates::prelude::*;
use tempfile::TempDir;

fn duplicate_pair(dir: &TempDir) {
    create_file(dir.path(), "a.txt", b"duplicate content");
    create_file(dir.path(), "b.txt", b"duplicate content");
}

#[test]
fn test_human_output_shows_report() {
    let dir = TempDir::new().unwrap();
    duplicate_pair(&dir);

    dupescan()
        .arg(dir.path())
        .arg("--no-progress")
        .assert()
        .success()
        .stdout(predicate::str::contains("Duplicate Report"))
        .stdout(predicate::str::contains("17 B"));
}

#[test]
fn test_human_output_without_duplicates() {
    let dir = TempDir::new().unwrap();
    create_file(dir.path(), "a.txt", b"unique content a");

    dupescan()
        .arg(dir.path())
        .arg("--no-progress")
        .assert()
        .success()
        .stdout(predicate::str::contains("No duplicates found."));
}

#[test]
fn test_json_output_structure() {
    let dir = TempDir::new().unwrap();
    duplicate_pair(&dir);

    let json = scan_json(dir.path(), &[]);

    let stats = &json["stats"];
    assert_eq!(stats["total_files"], 2);
    assert_eq!(stats["unreadable_files"], 0);
    assert_eq!(stats["duplicate_groups"], 1);
    assert_eq!(stats["duplicate_files"], 2);
    assert_eq!(stats["wasted_bytes"], 17);
    assert!(json.get("deletion").is_none());

    let groups = json["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 1);

    let group = &groups[0];
    assert_eq!(group["size"], 17);
    let fingerprint = group["fingerprint"].as_str().unwrap();
    assert_eq!(fingerprint.len(), 64);
    assert!(fingerprint.chars().all(|c| c.is_ascii_hexdigit()));
    assert!(group["files"].as_array().unwrap().iter().all(|f| f.is_string()));

    assert_eq!(get_all_filenames(&json), ["a.txt", "b.txt"]);
}

#[test]
fn test_quiet_output_is_empty() {
    let cases: [(&[u8], &[u8]); 2] = [(b"same", b"same"), (b"one", b"two")];

    for (a, b) in cases {
        let dir = TempDir::new().unwrap();
        create_file(dir.path(), "a.txt", a);
        create_file(dir.path(), "b.txt", b);

        dupescan()
            .arg(dir.path())
            .args(["--format", "quiet"])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
    }
}

#[test]
fn test_verbose_lists_group_members() {
    let dir = TempDir::new().unwrap();
    duplicate_pair(&dir);

    dupescan()
        .arg(dir.path())
        .args(["--verbose", "--no-progress"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Group 1:"))
        .stdout(predicate::str::contains("a.txt"))
        .stdout(predicate::str::contains("b.txt"));
}

#[test]
fn test_non_verbose_hides_group_members() {
    let dir = TempDir::new().unwrap();
    duplicate_pair(&dir);

    dupescan()
        .arg(dir.path())
        .arg("--no-progress")
        .assert()
        .success()
        .stdout(predicate::str::contains("a.txt").not());
}
