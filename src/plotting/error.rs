// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors from drawing figures.

use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum DrawError {
    #[error("While laying out the figure: {0}")]
    Layout(String),

    #[error("While plotting a panel: {0}")]
    Panel(String),

    #[error("While writing the image: {0}")]
    Present(String),
}

#[derive(Error, Debug)]
pub(crate) enum TuiError {
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}
