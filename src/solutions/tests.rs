// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;
use indexmap::IndexMap;
use ndarray::prelude::*;

use super::*;

/// A small entry of well-behaved solutions. The values are deterministic so
/// tests can reason about amplitudes and phases.
pub(crate) fn make_solutions(name: &str) -> GainSolutions {
    let num_times = 4;
    let num_chans = 16;
    let num_ants = 3;
    let gains = Array4::from_shape_fn((num_times, num_chans, num_ants, NUM_CORRS), |(t, c, a, p)| {
        c64::new(
            1.0 + t as f64 * 0.1 + c as f64 * 0.01 + a as f64 + p as f64 * 0.25,
            0.05 * t as f64 - 0.1 * p as f64,
        )
    });
    GainSolutions {
        name: name.to_string(),
        gains,
        times: Array1::linspace(1598043000.0, 1598043030.0, num_times),
        freqs: Array1::linspace(856e6, 1712e6, num_chans),
        ant_names: vec!["m000".to_string(), "m001".to_string(), "m002".to_string()],
        flagged_ants: vec![],
    }
}

pub(crate) fn make_database(names: &[&str]) -> SolutionDatabase {
    let mut entries = IndexMap::new();
    for name in names {
        entries.insert(name.to_string(), make_solutions(name));
    }
    SolutionDatabase { entries }
}

#[test]
fn test_write_and_read_solutions() {
    let mut db = make_database(&["G:gain", "B:gain"]);
    // Flag an antenna in one entry.
    db.entries["B:gain"]
        .gains
        .slice_mut(s![.., .., 2, ..])
        .fill(c64::new(f64::NAN, f64::NAN));

    let tmp_file = tempfile::NamedTempFile::new().expect("Couldn't make tmp file");
    let result = db.write_inner(tmp_file.path());
    assert!(result.is_ok(), "{:?}", result.err());

    let result = SolutionDatabase::read_inner(tmp_file.path());
    assert!(result.is_ok(), "{:?}", result.err());
    let read_db = result.unwrap();

    assert_eq!(read_db.entries.len(), 2);
    for (written, read) in db.entries.values().zip(read_db.entries.values()) {
        assert_eq!(written.name, read.name);
        assert_eq!(written.ant_names, read.ant_names);
        assert_eq!(written.gains.dim(), read.gains.dim());
        assert_abs_diff_eq!(written.times, read.times);
        assert_abs_diff_eq!(written.freqs, read.freqs);
        written.gains.iter().zip(read.gains.iter()).for_each(|(w, r)| {
            if w.re.is_nan() {
                assert!(r.re.is_nan() && r.im.is_nan());
            } else {
                assert_abs_diff_eq!(w.re, r.re);
                assert_abs_diff_eq!(w.im, r.im);
            }
        });
    }

    // The reader notices the all-NaN antenna.
    assert!(read_db.entries["G:gain"].flagged_ants.is_empty());
    assert_eq!(read_db.entries["B:gain"].flagged_ants, [2]);
}

#[test]
fn test_partially_flagged_antennas_are_not_reported() {
    let mut db = make_database(&["G:gain"]);
    // NaN out a single timestep of one antenna.
    db.entries["G:gain"]
        .gains
        .slice_mut(s![0, .., 1, ..])
        .fill(c64::new(f64::NAN, f64::NAN));

    let tmp_file = tempfile::NamedTempFile::new().expect("Couldn't make tmp file");
    db.write_inner(tmp_file.path()).unwrap();
    let read_db = SolutionDatabase::read_inner(tmp_file.path()).unwrap();
    assert!(read_db.entries["G:gain"].flagged_ants.is_empty());
}

#[test]
fn test_bad_magic_bytes_are_rejected() {
    let tmp_file = tempfile::NamedTempFile::new().expect("Couldn't make tmp file");
    std::fs::write(tmp_file.path(), b"this is certainly not a database").unwrap();

    let result = SolutionDatabase::read_inner(tmp_file.path());
    assert!(matches!(result, Err(SolutionsReadError::BadMagic { .. })));
}

#[test]
fn test_unsupported_format_version_is_rejected() {
    let db = make_database(&["G:gain"]);
    let tmp_file = tempfile::NamedTempFile::new().expect("Couldn't make tmp file");
    db.write_inner(tmp_file.path()).unwrap();

    // Bump the version byte just after the magic bytes.
    let mut bytes = std::fs::read(tmp_file.path()).unwrap();
    bytes[MAGIC.len()] = FORMAT_VERSION + 1;
    std::fs::write(tmp_file.path(), &bytes).unwrap();

    let result = SolutionDatabase::read_inner(tmp_file.path());
    match result {
        Err(SolutionsReadError::BadVersion { expected, got, .. }) => {
            assert_eq!(expected, FORMAT_VERSION);
            assert_eq!(got, FORMAT_VERSION + 1);
        }
        _ => panic!("expected BadVersion, got {result:?}"),
    }
}

#[test]
fn test_oversized_dims_are_rejected() {
    use byteorder::{LittleEndian, WriteBytesExt};

    // A tiny file whose header claims grids that could never fit in it.
    let read_with_dims = |dims: [u32; 4]| {
        let mut bytes = vec![];
        bytes.extend_from_slice(MAGIC);
        bytes.push(FORMAT_VERSION);
        bytes.extend_from_slice(&[0; 7]);
        bytes.write_u32::<LittleEndian>(1).unwrap();
        bytes.write_u32::<LittleEndian>(6).unwrap();
        bytes.extend_from_slice(b"G:gain");
        for dim in dims {
            bytes.write_u32::<LittleEndian>(dim).unwrap();
        }

        let tmp_file = tempfile::NamedTempFile::new().expect("Couldn't make tmp file");
        std::fs::write(tmp_file.path(), &bytes).unwrap();
        SolutionDatabase::read_inner(tmp_file.path())
    };

    // The product of these dimensions overflows 64 bits.
    let result = read_with_dims([1 << 20, 1 << 20, 1 << 21, 4]);
    assert!(matches!(result, Err(SolutionsReadError::BadShape { .. })));

    // These don't overflow, but need gigabytes the file doesn't have.
    let result = read_with_dims([1000, 1000, 1000, 4]);
    assert!(matches!(result, Err(SolutionsReadError::BadShape { .. })));
}

#[test]
fn test_writing_without_four_correlations_is_rejected() {
    let sols = make_solutions("G:gain");
    let (num_times, num_chans, num_ants, _) = sols.gains.dim();
    let bad = GainSolutions {
        gains: Array4::from_elem((num_times, num_chans, num_ants, 2), c64::new(1.0, 0.0)),
        ..sols
    };
    let mut entries = IndexMap::new();
    entries.insert(bad.name.clone(), bad);
    let db = SolutionDatabase { entries };

    let tmp_file = tempfile::NamedTempFile::new().expect("Couldn't make tmp file");
    let result = db.write_inner(tmp_file.path());
    assert!(matches!(
        result,
        Err(SolutionsWriteError::BadCorrCount { got: 2, .. })
    ));
}

#[test]
fn test_find_entry_with_explicit_label() {
    let db = make_database(&["G:gain", "B:gain"]);

    // The label is joined with the parameter name to pick the entry.
    let sols = db.find_entry(Some("B"), "gain").unwrap();
    assert_eq!(sols.name, "B:gain");
    let sols = db.find_entry(Some("G"), "gain").unwrap();
    assert_eq!(sols.name, "G:gain");

    let result = db.find_entry(Some("dE"), "gain");
    assert!(matches!(
        result,
        Err(SolutionsReadError::LabelNotFound { .. })
    ));

    // The parameter name is part of the lookup, not just the label.
    let result = db.find_entry(Some("G"), "offset");
    assert!(matches!(
        result,
        Err(SolutionsReadError::LabelNotFound { .. })
    ));
}

#[test]
fn test_find_entry_by_param() {
    let db = make_database(&["de:offset", "G:gain", "B:gain"]);

    // The first matching entry wins.
    let sols = db.find_entry(None, "gain").unwrap();
    assert_eq!(sols.name, "G:gain");

    let sols = db.find_entry(None, "offset").unwrap();
    assert_eq!(sols.name, "de:offset");

    let result = db.find_entry(None, "delay");
    assert!(matches!(
        result,
        Err(SolutionsReadError::NoMatchingParam { .. })
    ));
}

#[test]
fn test_param_matching_is_exact() {
    let db = make_database(&["G:gainfoo"]);
    // "gain" must not match "gainfoo".
    let result = db.find_entry(None, "gain");
    assert!(matches!(
        result,
        Err(SolutionsReadError::NoMatchingParam { .. })
    ));
}
