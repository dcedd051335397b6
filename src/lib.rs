// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Plotting for antenna gain calibration solutions.
 */

mod classify;
mod cli;
mod figure;
mod filenames;
#[cfg(feature = "plotting")]
mod plotting;
mod solutions;

// Re-exports.
pub use cli::{SolplotArgs, SolplotError};
pub use solutions::{GainSolutions, SolutionDatabase};

/// A shorthand for a complex number with two 64-bit floats.
#[allow(non_camel_case_types)]
pub type c64 = num_complex::Complex<f64>;
