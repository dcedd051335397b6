// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to read and write gain-solution databases.
//!
//! A database holds one or more labelled entries of Jones-matrix solutions.
//! Solvers name entries after the Jones term and the solved parameter, e.g.
//! "G:gain" or "B:gain"; the part before the colon also tells the plotting
//! code what kind of solutions they are.

mod db;
mod error;
#[cfg(test)]
pub(crate) mod tests;

pub use error::{SolutionsReadError, SolutionsWriteError};

use std::path::Path;

use indexmap::IndexMap;
use itertools::Itertools;
use log::debug;
use ndarray::prelude::*;
use regex::Regex;

use crate::{c64, SolplotError};

/// Jones matrices are stored with their four correlation products flattened,
/// in the order g00, g01, g10, g11.
pub(crate) const NUM_CORRS: usize = 4;

const MAGIC: &[u8; 8] = b"GAINSOLS";
const FORMAT_VERSION: u8 = 1;

/// All of the solution entries in one database file, keyed by their names.
/// Iteration order is the order the entries appear in the file.
#[derive(Debug)]
pub struct SolutionDatabase {
    pub entries: IndexMap<String, GainSolutions>,
}

/// One entry of gain solutions on a (time, frequency, antenna) grid.
#[derive(Debug)]
pub struct GainSolutions {
    /// The name of this entry within its database (e.g. "G:gain"). The part
    /// before the colon is the entry's label.
    pub name: String,

    /// The solutions. The dimensions are timestep, channel, antenna and
    /// correlation product (g00, g01, g10, g11 in that order). Flagged
    /// solutions are NaN.
    pub gains: Array4<c64>,

    /// The UTC timestamp of each timestep, as seconds since the unix epoch.
    pub times: Array1<f64>,

    /// The centre frequency of each channel, in Hz.
    pub freqs: Array1<f64>,

    /// The antenna names, in the same order as the antenna dimension of
    /// `gains`.
    pub ant_names: Vec<String>,

    /// The indices of antennas whose solutions are all NaN.
    pub flagged_ants: Vec<usize>,
}

impl SolutionDatabase {
    /// Read all of the solution entries out of a database file.
    pub fn read<P: AsRef<Path>>(file: P) -> Result<SolutionDatabase, SolplotError> {
        Self::read_inner(file).map_err(SolplotError::from)
    }

    pub(crate) fn read_inner<P: AsRef<Path>>(
        file: P,
    ) -> Result<SolutionDatabase, SolutionsReadError> {
        db::read(file)
    }

    /// Write all of the solution entries to a database file.
    pub fn write<P: AsRef<Path>>(&self, file: P) -> Result<(), SolplotError> {
        self.write_inner(file).map_err(SolplotError::from)
    }

    pub(crate) fn write_inner<P: AsRef<Path>>(
        &self,
        file: P,
    ) -> Result<(), SolutionsWriteError> {
        db::write(self, file)
    }

    /// Find the entry to plot. An explicit label is joined with the
    /// parameter name, so label "G" and parameter "gain" select the entry
    /// "G:gain"; otherwise the first entry named like "<term>:<param>" wins.
    pub(crate) fn find_entry(
        &self,
        label: Option<&str>,
        param: &str,
    ) -> Result<&GainSolutions, SolutionsReadError> {
        debug!(
            "The database contains solutions for {}",
            self.entries.keys().join(", ")
        );
        match label {
            Some(label) => {
                let name = format!("{label}:{param}");
                self.entries
                    .get(&name)
                    .ok_or_else(|| SolutionsReadError::LabelNotFound {
                        name,
                        available: self.entries.keys().join(", "),
                    })
            }

            None => {
                let re = Regex::new(&format!(r"^\w+:{}$", regex::escape(param)))
                    .expect("escaped param always forms a valid regex");
                let mut matches = self.entries.values().filter(|sols| re.is_match(&sols.name));
                let first =
                    matches
                        .next()
                        .ok_or_else(|| SolutionsReadError::NoMatchingParam {
                            param: param.to_string(),
                            available: self.entries.keys().join(", "),
                        })?;
                if matches.next().is_some() {
                    debug!(
                        "Multiple '{param}' entries are present; using the first one"
                    );
                }
                debug!("Solution label is '{}'", first.name);
                Ok(first)
            }
        }
    }
}
