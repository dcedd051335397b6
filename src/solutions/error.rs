// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with reading or writing solution databases.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SolutionsReadError {
    #[error("'{file}' is not a gain-solutions database; the magic bytes at the start of the file are wrong")]
    BadMagic { file: PathBuf },

    #[error("'{file}' uses database format version {got}, but only version {expected} is supported")]
    BadVersion {
        file: PathBuf,
        expected: u8,
        got: u8,
    },

    #[error("'{file}' contains no solution entries")]
    NoEntries { file: PathBuf },

    #[error("Solution entry '{name}' has {got} correlation products per antenna; expected {expected}")]
    BadCorrCount {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("Solution entry '{name}' in '{file}' claims a {num_times}x{num_chans}x{num_ants} grid, which doesn't fit in the file")]
    BadShape {
        file: PathBuf,
        name: String,
        num_times: usize,
        num_chans: usize,
        num_ants: usize,
    },

    #[error("A string in the database is not valid UTF-8")]
    BadString(#[from] std::string::FromUtf8Error),

    #[error("No entry named '{name}' exists in the database (available: {available})")]
    LabelNotFound { name: String, available: String },

    #[error("No '{param}' entries exist in the database (available: {available})")]
    NoMatchingParam { param: String, available: String },

    #[error(transparent)]
    IO(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum SolutionsWriteError {
    #[error("Solution entry '{name}' has {got} correlation products per antenna; expected {expected}")]
    BadCorrCount {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("Solution entry '{name}' has {num_ants} antennas but {num_names} antenna names")]
    MismatchedAntNames {
        name: String,
        num_ants: usize,
        num_names: usize,
    },

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
