// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Plotting gain solution databases.

#[cfg(feature = "plotting")]
mod driver;
mod error;
#[cfg(feature = "plotting")]
mod printers;

#[cfg(feature = "plotting")]
pub(super) use driver::plot_all_sol_files;
pub(crate) use error::SolutionsPlotError;
