//! Property-based tests for how files are classified

use proptest::collection::btree_map;
use proptest::prelude::*;
use proptest::test_runner::{Config, TestRunner};
use std::collections::{BTreeMap, BTreeSet};
use tempfile::TempDir;
use veepiaci::manifest::{Manifest, ManifestFormat};
use veepiaci::progress::ProgressEvent;
use veepiaci::tree::hasher::FileHasher;
use veepiaci::verify::verify_with_observer;

/// Small file set: name -> (content on disk?, content recorded in manifest?)
fn scenario() -> impl Strategy<Value = BTreeMap<String, (Option<Vec<u8>>, Option<Vec<u8>>)>> {
    let content = prop::collection::vec(any::<u8>(), 0..64);
    btree_map(
        "[a-z]{1,8}\\.dat",
        (proptest::option::of(content.clone()), proptest::option::of(content)),
        0..8,
    )
}

fn runner() -> TestRunner {
    TestRunner::new(Config {
        cases: 32,
        ..Config::default()
    })
}

#[test]
fn test_classification_partitions_files() {
    runner()
        .run(&scenario(), |files| {
            let temp_dir = TempDir::new().unwrap();
            let hasher = FileHasher::new();
            let mut recorded = Vec::new();
            for (name, (on_disk, in_manifest)) in &files {
                if let Some(bytes) = on_disk {
                    std::fs::write(temp_dir.path().join(name), bytes).unwrap();
                }
                if let Some(bytes) = in_manifest {
                    let digests = hasher.hash_reader(bytes.as_slice()).unwrap();
                    recorded.push((name.clone(), digests));
                }
            }
            let manifest = Manifest::new(ManifestFormat::Generic, recorded).unwrap();

            let mut events = Vec::new();
            let result = verify_with_observer(manifest, temp_dir.path(), &mut events).unwrap();

            let mismatches: BTreeSet<_> = result.mismatches().iter().cloned().collect();
            let missing: BTreeSet<_> = result.missing_files().iter().cloned().collect();
            let additional: BTreeSet<_> = result.additional_files().iter().cloned().collect();
            prop_assert!(mismatches.is_disjoint(&missing));
            prop_assert!(mismatches.is_disjoint(&additional));
            prop_assert!(missing.is_disjoint(&additional));

            let mut expected_missing = BTreeSet::new();
            let mut expected_additional = BTreeSet::new();
            let mut expected_mismatches = BTreeSet::new();
            let mut both = 0;
            for (name, (on_disk, in_manifest)) in &files {
                match (on_disk, in_manifest) {
                    (Some(disk), Some(recorded)) => {
                        both += 1;
                        if disk != recorded {
                            expected_mismatches.insert(name.clone());
                        }
                    }
                    (Some(_), None) => {
                        expected_additional.insert(name.clone());
                    }
                    (None, Some(_)) => {
                        expected_missing.insert(name.clone());
                    }
                    (None, None) => {}
                }
            }
            prop_assert_eq!(&missing, &expected_missing);
            prop_assert_eq!(&additional, &expected_additional);
            prop_assert_eq!(&mismatches, &expected_mismatches);

            let checked = events
                .iter()
                .filter(|e| matches!(e, ProgressEvent::FileChecked { .. }))
                .count();
            prop_assert_eq!(checked, both);
            prop_assert_eq!(
                result.success(),
                mismatches.is_empty() && missing.is_empty() && additional.is_empty()
            );
            Ok(())
        })
        .unwrap();
}

#[test]
fn test_chunk_size_does_not_change_digest() {
    runner()
        .run(
            &(prop::collection::vec(any::<u8>(), 0..2048), 1usize..600),
            |(bytes, chunk_size)| {
                let default = FileHasher::new().hash_reader(bytes.as_slice()).unwrap();
                let chunked = FileHasher::new()
                    .with_chunk_size(chunk_size)
                    .hash_reader(bytes.as_slice())
                    .unwrap();
                prop_assert_eq!(default, chunked);
                Ok(())
            },
        )
        .unwrap();
}
