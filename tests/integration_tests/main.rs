// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod cli_args;
mod plot;

use std::{
    path::{Path, PathBuf},
    process::Output,
    str::from_utf8,
};

use assert_cmd::{output::OutputError, Command};
use indexmap::IndexMap;
use ndarray::prelude::*;

use solplot::{c64, GainSolutions, SolutionDatabase};

fn solplot() -> Command {
    Command::cargo_bin("solplot").unwrap()
}

fn get_cmd_output(result: Result<Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        from_utf8(&output.stdout).unwrap().to_string(),
        from_utf8(&output.stderr).unwrap().to_string(),
    )
}

/// Write a small single-entry database into `tmp_dir` and return its path.
fn get_test_database(tmp_dir: &Path, label: &str) -> PathBuf {
    let sols = GainSolutions {
        name: label.to_string(),
        gains: Array4::from_elem((2, 8, 2, 4), c64::new(1.0, 0.0)),
        times: Array1::linspace(1598043000.0, 1598043008.0, 2),
        freqs: Array1::linspace(856e6, 1712e6, 8),
        ant_names: vec!["m000".to_string(), "m001".to_string()],
        flagged_ants: vec![],
    };
    let mut entries = IndexMap::new();
    entries.insert(label.to_string(), sols);
    let db = SolutionDatabase { entries };

    let file = tmp_dir.join("sols.db");
    db.write(&file).unwrap();
    file
}
