use std::fs;
use std::thread;
use std::time::{Duration, SystemTime};
use tempfile::tempdir;

use shotreap_core::scheduler::{discover_folders, folder_timestamp};

#[test]
fn test_discovery_orders_newest_first() {
    let tmp = tempdir().unwrap();
    let older = tmp.path().join("batch_old");
    fs::create_dir(&older).unwrap();
    thread::sleep(Duration::from_millis(300));
    let newer = tmp.path().join("batch_new");
    fs::create_dir(&newer).unwrap();

    let folders = discover_folders(tmp.path(), &[]).unwrap();
    assert_eq!(folders, vec![newer, older]);
}

#[test]
fn test_discovery_skips_excluded_names_and_plain_files() {
    let tmp = tempdir().unwrap();
    fs::create_dir(tmp.path().join("batch_a")).unwrap();
    fs::create_dir(tmp.path().join("tm_daily_ingest_2025")).unwrap();
    fs::write(tmp.path().join("stray.png"), b"x").unwrap();

    let folders =
        discover_folders(tmp.path(), &["*tm_daily_ingest*".to_string()]).unwrap();
    assert_eq!(folders, vec![tmp.path().join("batch_a")]);
}

#[test]
fn test_invalid_exclude_pattern_is_ignored() {
    let tmp = tempdir().unwrap();
    fs::create_dir(tmp.path().join("batch_a")).unwrap();

    let folders = discover_folders(tmp.path(), &["[".to_string()]).unwrap();
    assert_eq!(folders, vec![tmp.path().join("batch_a")]);
}

#[test]
fn test_missing_root_is_an_error() {
    let tmp = tempdir().unwrap();
    assert!(discover_folders(&tmp.path().join("no_root"), &[]).is_err());
}

#[test]
fn test_empty_root_yields_no_folders() {
    let tmp = tempdir().unwrap();
    assert!(discover_folders(tmp.path(), &[]).unwrap().is_empty());
}

#[test]
fn test_timestamp_of_missing_path_is_the_epoch() {
    let tmp = tempdir().unwrap();
    assert_eq!(
        folder_timestamp(&tmp.path().join("gone")),
        SystemTime::UNIX_EPOCH
    );
}
