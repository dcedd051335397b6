// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Pretty printers for reporting information.

use std::{borrow::Cow, path::Path};

use hifitime::Epoch;
use itertools::Itertools;

use crate::solutions::GainSolutions;

const VERTICAL: char = '│';
const UP_AND_RIGHT: char = '└';
const VERTICAL_AND_RIGHT: char = '├';

pub(crate) struct InfoPrinter {
    title: Cow<'static, str>,
    blocks: Vec<Vec<Cow<'static, str>>>,
}

impl InfoPrinter {
    pub(crate) fn new(title: Cow<'static, str>) -> Self {
        Self {
            title,
            blocks: vec![],
        }
    }

    pub(crate) fn push_line(&mut self, line: Cow<'static, str>) {
        self.blocks.push(vec![line]);
    }

    pub(crate) fn push_block(&mut self, block: Vec<Cow<'static, str>>) {
        self.blocks.push(block);
    }

    pub(crate) fn display(self) {
        log::info!("{}", console::style(self.title).bold());
        let num_blocks = self.blocks.len();
        for (i_block, block) in self.blocks.into_iter().enumerate() {
            let num_lines = block.len();
            for (i_line, line) in block.into_iter().enumerate() {
                let symbol = match (i_line, i_line + 1 == num_lines, i_block + 1 == num_blocks) {
                    (0, false, _) => VERTICAL_AND_RIGHT,
                    (0, _, false) => VERTICAL_AND_RIGHT,
                    (0, true, true) => UP_AND_RIGHT,
                    _ => VERTICAL,
                };
                log::info!("{symbol} {line}");
            }
        }
        log::info!("");
    }
}

/// Report the shape and provenance of the entry about to be plotted.
pub(super) fn print_solutions_summary(file: &Path, sols: &GainSolutions) {
    let (num_times, num_chans, num_ants, _) = sols.gains.dim();

    let mut printer =
        InfoPrinter::new(format!("Plotting '{}' from {}", sols.name, file.display()).into());
    printer
        .push_line(format!("{num_ants} antennas, {num_times} timesteps, {num_chans} channels").into());

    if let (Some(&first), Some(&last)) = (sols.times.first(), sols.times.last()) {
        printer.push_block(vec![
            format!("First timestep: {}", Epoch::from_unix_seconds(first)).into(),
            format!("Time span: {:.2} h", (last - first) / 3600.0).into(),
        ]);
    }
    if let (Some(&first), Some(&last)) = (sols.freqs.first(), sols.freqs.last()) {
        printer
            .push_line(format!("Frequencies: {:.3} to {:.3} MHz", first / 1e6, last / 1e6).into());
    }

    let flagged = match sols.flagged_ants.as_slice() {
        [] => "Flagged antennas: none".to_string(),
        flagged => format!(
            "Flagged antennas: {}",
            flagged
                .iter()
                .map(|&i| sols.ant_names[i].as_str())
                .join(", ")
        ),
    };
    printer.push_line(flagged.into());

    printer.display();
}
