//! Result file written from a verification run

use crate::integration::test_utils::*;
use std::fs;
use tempfile::TempDir;
use veepiaci::report::VerificationReport;
use veepiaci::verify::verify_with_observer;

#[test]
fn test_report_file_lists_problems() {
    let temp_dir = TempDir::new().unwrap();
    create_empty_file(temp_dir.path(), "empty.dat");
    create_file_with_data(temp_dir.path(), "extra.dat");

    let mut report = VerificationReport::new();
    verify_with_observer(
        manifest(&[("empty.dat", DATA_MD5), ("gone.dat", EMPTY_MD5)]),
        temp_dir.path(),
        &mut report,
    )
    .unwrap();
    assert!(report.is_finished());

    let out = TempDir::new().unwrap();
    let result_file = out.path().join("reports/result.txt");
    report.write_to(&result_file).unwrap();

    let text = fs::read_to_string(result_file).unwrap();
    let bodies: Vec<&str> = text
        .lines()
        .map(|line| line.splitn(3, ' ').nth(2).unwrap_or(""))
        .collect();

    assert!(bodies[0].starts_with("Starting verification in "));
    assert!(bodies.contains(&"\u{274c} empty.dat"));
    assert!(bodies.contains(&"Verification finished. The overall result is: \u{274c} failure"));
    for (heading, path) in [
        ("The following files had incorrect checksums:", "empty.dat"),
        ("The following files are missing:", "gone.dat"),
        ("The following files did not have checksums:", "extra.dat"),
    ] {
        let at = bodies.iter().position(|b| *b == heading).unwrap();
        assert_eq!(bodies[at + 1], path);
    }
}
