// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[cfg(feature = "plotting")]
use crate::plotting::{DrawError, TuiError};

#[derive(Error, Debug)]
pub(crate) enum SolutionsPlotError {
    #[cfg(not(feature = "plotting"))]
    #[error("solplot was not compiled with the \"plotting\" feature.\nYou need to compile solplot from source with this feature to make any plots.")]
    NoPlottingFeature,

    #[cfg(feature = "plotting")]
    #[error("No solution databases supplied!")]
    NoInputs,

    #[cfg(feature = "plotting")]
    #[error("Error from the plotters library: {0}")]
    Draw(#[from] DrawError),

    #[cfg(feature = "plotting")]
    #[error(transparent)]
    Tui(#[from] TuiError),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
