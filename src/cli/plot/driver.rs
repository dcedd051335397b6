// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turn each input database into figures, then write or display them.

use std::path::PathBuf;

use log::{debug, info, warn};

use super::{printers::print_solutions_summary, SolutionsPlotError};
use crate::{
    classify::{classify, FamilyOverrides},
    cli::SolplotArgs,
    figure::{FamilyRenderer, Figure, PlotGeometry, RenderConfig, UserLimits},
    filenames::{OutputNamer, OutputTarget},
    plotting::{display::present_all, save_png},
    solutions::SolutionDatabase,
};

pub(crate) fn plot_all_sol_files(args: SolplotArgs) -> Result<(), SolutionsPlotError> {
    let products = process_files(&args)?;
    if !products.deferred.is_empty() {
        // One blocking viewer session at the end of the batch.
        present_all(&products.deferred)?;
    }
    Ok(())
}

/// What a run produced. Deferred figures are waiting for the terminal
/// viewer, which must not start until every file has been handled.
#[derive(Default)]
struct RunProducts {
    written: Vec<PathBuf>,
    deferred: Vec<Figure>,
}

fn process_files(args: &SolplotArgs) -> Result<RunProducts, SolutionsPlotError> {
    if args.files.is_empty() {
        return Err(SolutionsPlotError::NoInputs);
    }

    let namer = OutputNamer {
        explicit: args.output_name.clone(),
        display: args.display,
        out_dir: args.output_directory.clone(),
    };
    if !args.display {
        if let Some(dir) = args.output_directory.as_deref() {
            std::fs::create_dir_all(dir)?;
        }
    }

    let overrides = FamilyOverrides {
        gain: args.gain,
        bandpass: args.bandpass,
        leakage: args.leakage,
    };
    let geometry = PlotGeometry {
        num_rows: args.num_rows,
        num_cols: args.num_cols,
        width: args.width,
        height: args.height,
    };
    let limits = UserLimits {
        min_amp: args.min_amp,
        max_amp: args.max_amp,
        max_reim: args.max_reim,
        max_phase: args.max_phase,
        min_time: args.min_time,
        max_time: args.max_time,
        min_freq: args.min_freq,
        max_freq: args.max_freq,
    };

    let mut products = RunProducts::default();
    for file in &args.files {
        debug!("Reading solutions from '{}'", file.display());
        // A bad file should not sink the whole batch.
        let db = match SolutionDatabase::read_inner(file) {
            Ok(db) => db,
            Err(e) => {
                warn!("Skipping '{}': {e}", file.display());
                continue;
            }
        };
        let sols = match db.find_entry(args.label.as_deref(), &args.param) {
            Ok(sols) => sols,
            Err(e) => {
                warn!("Skipping '{}': {e}", file.display());
                continue;
            }
        };
        print_solutions_summary(file, sols);

        let request = classify(sols, overrides);
        for family in request.families() {
            let renderer = FamilyRenderer::from(family);
            let config = RenderConfig {
                title: format!(
                    "{} solutions from {}",
                    renderer.caption_noun(),
                    file.display()
                ),
                geometry,
                limits,
                ..RenderConfig::for_family(family, args.diag, args.off_diag)
            };
            let figure = renderer.render(sols, &config);
            match namer.target(file, family, request.multiple_families()) {
                OutputTarget::Image(path) => {
                    save_png(&figure, &path)?;
                    info!("Wrote {}", path.display());
                    products.written.push(path);
                }
                OutputTarget::Display => products.deferred.push(figure),
            }
        }
    }
    Ok(products)
}
