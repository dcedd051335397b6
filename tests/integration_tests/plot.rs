// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests against the plotting driver that never reach a drawing backend, so
//! they run fine without fonts or a terminal.

use tempfile::TempDir;

use crate::{get_cmd_output, get_test_database, solplot};

#[test]
fn test_unreadable_files_are_skipped() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let garbage = tmp_dir.path().join("garbage.db");
    std::fs::write(&garbage, "not a database").unwrap();
    let missing = tmp_dir.path().join("missing.db");

    let cmd = solplot()
        .args([garbage.to_str().unwrap(), missing.to_str().unwrap()])
        .ok();
    assert!(
        cmd.is_ok(),
        "solplot failed on unreadable inputs: {}",
        cmd.err().unwrap()
    );
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Skipping"), "no skip warnings in: {stdout}");

    // Nothing new was written next to the garbage file; missing.db never
    // existed.
    assert_eq!(std::fs::read_dir(tmp_dir.path()).unwrap().count(), 1);
}

#[test]
fn test_unmatched_param_is_skipped() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let file = get_test_database(tmp_dir.path(), "G:gain");

    let cmd = solplot()
        .args([file.to_str().unwrap(), "--param", "delay"])
        .ok();
    assert!(
        cmd.is_ok(),
        "solplot failed on an unmatched param: {}",
        cmd.err().unwrap()
    );
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Skipping"), "no skip warning in: {stdout}");
    assert!(stdout.contains("delay"), "param missing from: {stdout}");

    // Only the database itself is in the directory.
    assert_eq!(std::fs::read_dir(tmp_dir.path()).unwrap().count(), 1);
}

#[test]
fn test_unmatched_label_is_skipped() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let file = get_test_database(tmp_dir.path(), "G:gain");

    let cmd = solplot()
        .args([file.to_str().unwrap(), "--label", "B"])
        .ok();
    assert!(
        cmd.is_ok(),
        "solplot failed on an unmatched label: {}",
        cmd.err().unwrap()
    );
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Skipping"), "no skip warning in: {stdout}");
    assert_eq!(std::fs::read_dir(tmp_dir.path()).unwrap().count(), 1);
}
