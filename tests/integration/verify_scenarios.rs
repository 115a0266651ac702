//! Verification scenarios against real directories

use crate::integration::test_utils::*;
use tempfile::TempDir;
use unicode_normalization::UnicodeNormalization;
use veepiaci::progress::ProgressEvent;
use veepiaci::verify::{verify, verify_with_observer, ObserverFn, VerificationResult};
use veepiaci::VerifyError;

fn checked_files(events: &[ProgressEvent]) -> Vec<(String, bool)> {
    events
        .iter()
        .filter_map(|event| match event {
            ProgressEvent::FileChecked {
                relative_path,
                all_digests_matched,
                ..
            } => Some((relative_path.clone(), *all_digests_matched)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_all_files_match() {
    let dir = standard_directory();
    let result = verify(
        manifest(&[("empty.dat", EMPTY_MD5), ("data.dat", DATA_MD5)]),
        dir.path(),
    )
    .unwrap();

    assert!(result.success());
    assert_eq!(result.problem_count(), 0);
}

#[test]
fn test_changed_file_is_a_mismatch() {
    let dir = standard_directory();
    let result = verify(
        manifest(&[
            ("empty.dat", "d41d8cd98f00b204e9800998ecf8427f"),
            ("data.dat", DATA_MD5),
        ]),
        dir.path(),
    )
    .unwrap();

    assert!(!result.success());
    assert_eq!(result.mismatches().to_vec(), vec!["empty.dat".to_string()]);
    assert!(result.missing_files().is_empty());
    assert!(result.additional_files().is_empty());
}

#[test]
fn test_missing_file_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    create_empty_file(temp_dir.path(), "empty.dat");

    let result = verify(
        manifest(&[("empty.dat", EMPTY_MD5), ("data.dat", DATA_MD5)]),
        temp_dir.path(),
    )
    .unwrap();

    assert!(!result.success());
    assert!(result.mismatches().is_empty());
    assert_eq!(result.missing_files().to_vec(), vec!["data.dat".to_string()]);
    assert!(result.additional_files().is_empty());
}

#[test]
fn test_additional_file_is_reported() {
    let dir = standard_directory();
    let result = verify(manifest(&[("empty.dat", EMPTY_MD5)]), dir.path()).unwrap();

    assert!(!result.success());
    assert!(result.mismatches().is_empty());
    assert!(result.missing_files().is_empty());
    assert_eq!(result.additional_files().to_vec(), vec!["data.dat".to_string()]);
}

#[test]
fn test_every_hashed_file_is_reported_with_its_outcome() {
    let dir = standard_directory();
    let mut events = Vec::new();
    verify_with_observer(
        manifest(&[
            ("empty.dat", "d41d8cd98f00b204e9800998ecf8427f"),
            ("data.dat", DATA_MD5),
        ]),
        dir.path(),
        &mut events,
    )
    .unwrap();

    let mut checked = checked_files(&events);
    checked.sort();
    assert_eq!(
        checked,
        vec![("data.dat".to_string(), true), ("empty.dat".to_string(), false)]
    );
}

#[test]
fn test_unlisted_and_missing_files_are_not_hashed() {
    let dir = standard_directory();
    let mut events = Vec::new();
    verify_with_observer(
        manifest(&[("empty.dat", EMPTY_MD5), ("gone.dat", DATA_MD5)]),
        dir.path(),
        &mut events,
    )
    .unwrap();

    assert_eq!(checked_files(&events), vec![("empty.dat".to_string(), true)]);
}

#[test]
fn test_event_order_and_final_result() {
    let dir = standard_directory();
    let mut events = Vec::new();
    let result = verify_with_observer(
        manifest(&[("empty.dat", EMPTY_MD5), ("data.dat", DATA_MD5)]),
        dir.path(),
        &mut events,
    )
    .unwrap();

    assert_eq!(events.len(), 4);
    assert_eq!(
        events.first(),
        Some(&ProgressEvent::Started {
            root_directory: dir.path().to_path_buf()
        })
    );
    assert_eq!(events.last(), Some(&ProgressEvent::Finished { result }));
}

#[test]
fn test_started_precedes_the_first_file() {
    let temp_dir = TempDir::new().unwrap();
    create_empty_file(temp_dir.path(), "empty.dat");

    let mut seen = Vec::new();
    verify_with_observer(
        manifest(&[("empty.dat", EMPTY_MD5)]),
        temp_dir.path(),
        &mut ObserverFn(|event: ProgressEvent| seen.push(event.event_type())),
    )
    .unwrap();

    assert_eq!(seen, vec!["started", "file_checked", "finished"]);
}

#[test]
fn test_decomposed_file_name_matches_composed_manifest_entry() {
    let temp_dir = TempDir::new().unwrap();
    let decomposed: String = "ümläut.txt".nfd().collect();
    create_file_with_data(temp_dir.path(), &decomposed);
    create_empty_file(temp_dir.path(), "empty.dat");

    let mut events = Vec::new();
    let result = verify_with_observer(
        manifest(&[("empty.dat", EMPTY_MD5), ("ümläut.txt", DATA_MD5)]),
        temp_dir.path(),
        &mut events,
    )
    .unwrap();

    assert!(result.success());
    assert!(checked_files(&events).contains(&("ümläut.txt".to_string(), true)));
}

#[test]
fn test_nested_paths_use_forward_slashes() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::create_dir_all(temp_dir.path().join("disc/audio")).unwrap();
    create_file_with_data(&temp_dir.path().join("disc/audio"), "track01.bin");

    let result = verify(
        manifest(&[("disc/audio/track01.bin", DATA_MD5)]),
        temp_dir.path(),
    )
    .unwrap();
    assert!(result.success());
}

#[test]
fn test_uppercase_manifest_digest_matches() {
    let dir = standard_directory();
    let result = verify(
        manifest(&[
            ("empty.dat", "D41D8CD98F00B204E9800998ECF8427E"),
            ("data.dat", DATA_MD5),
        ]),
        dir.path(),
    )
    .unwrap();
    assert!(result.success());
}

#[test]
fn test_empty_manifest_and_empty_directory_succeed() {
    let temp_dir = TempDir::new().unwrap();
    let mut events = Vec::new();
    let result = verify_with_observer(manifest(&[]), temp_dir.path(), &mut events).unwrap();

    assert!(result.success());
    assert_eq!(events.len(), 2);
}

#[test]
fn test_repeated_runs_give_equal_results() {
    let dir = standard_directory();
    let entries = [("empty.dat", EMPTY_MD5), ("extra.dat", DATA_MD5)];
    let first: VerificationResult = verify(manifest(&entries), dir.path()).unwrap();
    let second = verify(manifest(&entries), dir.path()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_missing_root_directory_fails_without_events() {
    let temp_dir = TempDir::new().unwrap();
    let mut events = Vec::new();
    let err = verify_with_observer(
        manifest(&[("empty.dat", EMPTY_MD5)]),
        &temp_dir.path().join("nowhere"),
        &mut events,
    )
    .unwrap_err();

    assert!(matches!(err, VerifyError::RootUnavailable { .. }));
    assert!(events.is_empty());
}

#[test]
fn test_file_as_root_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let file = create_empty_file(temp_dir.path(), "empty.dat");
    let err = verify(manifest(&[]), &file).unwrap_err();
    assert!(matches!(err, VerifyError::NotADirectory { .. }));
}

#[cfg(unix)]
#[test]
fn test_symlinked_file_is_hashed_through_the_link() {
    let temp_dir = TempDir::new().unwrap();
    let targets = TempDir::new().unwrap();
    let target = create_empty_file(targets.path(), "empty.dat");
    std::os::unix::fs::symlink(&target, temp_dir.path().join("link.dat")).unwrap();

    let result = verify(manifest(&[("link.dat", EMPTY_MD5)]), temp_dir.path()).unwrap();
    assert!(result.success());
}

#[cfg(unix)]
#[test]
fn test_unlisted_symlink_is_additional() {
    let temp_dir = TempDir::new().unwrap();
    let target = create_empty_file(temp_dir.path(), "a.dat");
    std::os::unix::fs::symlink(&target, temp_dir.path().join("extra.dat")).unwrap();

    let result = verify(manifest(&[("a.dat", EMPTY_MD5)]), temp_dir.path()).unwrap();
    assert!(!result.success());
    assert_eq!(result.additional_files().to_vec(), vec!["extra.dat".to_string()]);
}

#[cfg(target_os = "linux")]
#[test]
fn test_composed_and_decomposed_twins_are_both_accounted_for() {
    let temp_dir = TempDir::new().unwrap();
    create_empty_file(temp_dir.path(), "\u{e4}.txt");
    std::fs::write(temp_dir.path().join("a\u{0308}.txt"), b"x").unwrap();

    let result = verify(manifest(&[("\u{e4}.txt", EMPTY_MD5)]), temp_dir.path()).unwrap();
    assert!(result.mismatches().is_empty());
    assert_eq!(
        result.additional_files().to_vec(),
        vec!["a\u{0308}.txt".to_string()]
    );
}
