// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all solplot-related errors. This should be the *only*
//! error enum that is publicly visible.

use thiserror::Error;

use super::plot::SolutionsPlotError;
use crate::solutions::{SolutionsReadError, SolutionsWriteError};

/// The *only* publicly visible error from solplot.
#[derive(Error, Debug)]
pub enum SolplotError {
    /// An error related to making plots.
    #[error("{0}")]
    Plot(String),

    /// Generic error surrounding solution databases.
    #[error("{0}")]
    Solutions(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

impl From<SolutionsPlotError> for SolplotError {
    fn from(e: SolutionsPlotError) -> Self {
        let s = e.to_string();
        match e {
            #[cfg(not(feature = "plotting"))]
            SolutionsPlotError::NoPlottingFeature => Self::Plot(s),
            #[cfg(feature = "plotting")]
            SolutionsPlotError::NoInputs
            | SolutionsPlotError::Draw(_)
            | SolutionsPlotError::Tui(_) => Self::Plot(s),
            SolutionsPlotError::IO(e) => Self::from(e),
        }
    }
}

impl From<SolutionsReadError> for SolplotError {
    fn from(e: SolutionsReadError) -> Self {
        let s = e.to_string();
        match e {
            SolutionsReadError::BadMagic { .. }
            | SolutionsReadError::BadVersion { .. }
            | SolutionsReadError::NoEntries { .. }
            | SolutionsReadError::BadCorrCount { .. }
            | SolutionsReadError::BadShape { .. }
            | SolutionsReadError::BadString(_)
            | SolutionsReadError::LabelNotFound { .. }
            | SolutionsReadError::NoMatchingParam { .. } => Self::Solutions(s),
            SolutionsReadError::IO(e) => Self::from(e),
        }
    }
}

impl From<SolutionsWriteError> for SolplotError {
    fn from(e: SolutionsWriteError) -> Self {
        let s = e.to_string();
        match e {
            SolutionsWriteError::BadCorrCount { .. }
            | SolutionsWriteError::MismatchedAntNames { .. } => Self::Solutions(s),
            SolutionsWriteError::IO(e) => Self::from(e),
        }
    }
}

impl From<std::io::Error> for SolplotError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
