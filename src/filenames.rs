// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Where rendered figures end up.

use std::path::{Path, PathBuf};

use crate::classify::PlotFamily;

/// The destination of one rendered figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum OutputTarget {
    /// Write a PNG to this path.
    Image(PathBuf),

    /// Hold the figure back for the interactive viewer.
    Display,
}

/// Decides the destination of every figure in a run. The same namer is used
/// for every input file and family, so naming is deterministic across a
/// batch.
#[derive(Debug)]
pub(crate) struct OutputNamer {
    /// Write to exactly this filename, bypassing all derived names. Every
    /// family of every input shares this one path, so later figures
    /// overwrite earlier ones.
    pub(crate) explicit: Option<PathBuf>,

    /// Show figures in the terminal instead of writing files.
    pub(crate) display: bool,

    /// Put derived filenames in this directory instead of next to their
    /// inputs.
    pub(crate) out_dir: Option<PathBuf>,
}

impl OutputNamer {
    pub(crate) fn target(
        &self,
        input: &Path,
        family: PlotFamily,
        multiple_families: bool,
    ) -> OutputTarget {
        if self.display {
            return OutputTarget::Display;
        }
        if let Some(name) = &self.explicit {
            return OutputTarget::Image(name.clone());
        }

        let base = match &self.out_dir {
            Some(dir) => match input.file_name() {
                Some(name) => dir.join(name),
                None => dir.join(input),
            },
            None => input.to_path_buf(),
        };
        // The suffix goes after the input's extension: "x.db" becomes
        // "x.db.png", or "x.db.gain.png" when several families were asked
        // for.
        let mut with_suffix = base.into_os_string();
        if multiple_families {
            with_suffix.push(format!(".{family}.png"));
        } else {
            with_suffix.push(".png");
        }
        OutputTarget::Image(PathBuf::from(with_suffix))
    }
}
