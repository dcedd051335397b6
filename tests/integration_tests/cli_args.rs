// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests against the command-line interface.

use crate::{get_cmd_output, solplot};

#[test]
fn test_solplot_help_is_correct() {
    let mut stdouts = vec![];

    // First with --help
    let cmd = solplot().arg("--help").ok();
    assert!(cmd.is_ok());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty());
    stdouts.push(stdout);

    // Then with -h
    let cmd = solplot().arg("-h").ok();
    assert!(cmd.is_ok());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty());
    stdouts.push(stdout);

    for stdout in stdouts {
        assert!(stdout.contains("Plot antenna gain calibration solutions"));
        // The term-plot modes are listed against --diag and --off-diag.
        assert!(stdout.contains("--diag"));
        assert!(stdout.contains("--off-diag"));
        assert!(stdout.contains("ri, ap, none"));
    }
}

#[test]
fn test_solplot_version() {
    let cmd = solplot().arg("--version").ok();
    assert!(cmd.is_ok());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_invalid_term_plot_mode_fails() {
    let cmd = solplot().args(["--diag", "amplitude", "sols.db"]).ok();
    assert!(cmd.is_err(), "--diag amplitude did not fail");

    let cmd = solplot().args(["--off-diag", "rl", "sols.db"]).ok();
    assert!(cmd.is_err(), "--off-diag rl did not fail");
}

#[test]
fn test_no_input_files_fails() {
    let cmd = solplot().ok();
    assert!(cmd.is_err(), "solplot with no arguments did not fail");
    let (_, stderr) = get_cmd_output(cmd);
    assert!(
        stderr.contains("No solution databases supplied!"),
        "unexpected stderr: {stderr}"
    );
}
