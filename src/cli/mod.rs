// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Command-line interface code.
//!
//! Only 3 things should be public in this module: `SolplotArgs`,
//! `SolplotArgs::run`, and `SolplotError`.

mod error;
mod plot;

pub use error::SolplotError;

use std::path::PathBuf;

use clap::{AppSettings, Parser};
use log::info;

use crate::figure::{TermPlot, DEFAULT_HEIGHT, DEFAULT_WIDTH, TERM_PLOT_MODES};
#[cfg(not(feature = "plotting"))]
use plot::SolutionsPlotError;

// Add build-time information from the "built" crate.
include!(concat!(env!("OUT_DIR"), "/built.rs"));

lazy_static::lazy_static! {
    static ref DIAG_HELP: String =
        format!("How to plot the diagonal correlations (RR and LL). Supported: {}. The default is ap, or none for leakage solutions", *TERM_PLOT_MODES);
    static ref OFF_DIAG_HELP: String =
        format!("How to plot the off-diagonal correlations (RL and LR). Supported: {}. The default is none, or ri for leakage solutions", *TERM_PLOT_MODES);
}

#[derive(Parser, Debug, Default)]
#[clap(
    version,
    author,
    about = r#"Plot antenna gain calibration solutions.
Database entries are typed by the first letter of their labels:
G is a gain, B is a bandpass, D is a leakage."#
)]
#[clap(global_setting(AppSettings::DeriveDisplayOrder))]
#[clap(infer_long_args = true)]
pub struct SolplotArgs {
    #[clap(name = "SOLUTIONS_DBS", parse(from_os_str))]
    files: Vec<PathBuf>,

    /// Display the plots in the terminal instead of writing image files.
    #[clap(short, long, help_heading = "OUTPUT")]
    display: bool,

    /// The name of the image file to write. Every plot shares this one name,
    /// so later plots overwrite earlier ones.
    #[clap(short, long, help_heading = "OUTPUT")]
    output_name: Option<PathBuf>,

    /// The directory to write the plots into. If this doesn't exist, then the
    /// relevant directories will be created. The filenames are based off of
    /// the input files, just as they would be without specifying the output
    /// directory.
    #[clap(long, help_heading = "OUTPUT")]
    output_directory: Option<PathBuf>,

    /// The label of the solutions to plot, e.g. G. It is joined with the
    /// parameter name to select an entry, so label G and parameter gain plot
    /// the entry G:gain. The default is to search the entries by parameter
    /// name instead.
    #[clap(long, help_heading = "ENTRY SELECTION")]
    label: Option<String>,

    /// The parameter name to search the database entries for. An entry
    /// matches if its label is anything followed by a colon and this name.
    #[clap(short, long, default_value = "gain", help_heading = "ENTRY SELECTION")]
    param: String,

    /// Plot the gain family even if the entry's label doesn't start with G.
    #[clap(short, long, help_heading = "PLOT TYPES")]
    gain: bool,

    /// Plot the bandpass family even if the entry's label doesn't start with
    /// B.
    #[clap(short, long, help_heading = "PLOT TYPES")]
    bandpass: bool,

    /// Plot the leakage family even if the entry's label doesn't start with
    /// D.
    #[clap(short, long, help_heading = "PLOT TYPES")]
    leakage: bool,

    #[clap(long, help = DIAG_HELP.as_str(), help_heading = "PLOT TYPES")]
    diag: Option<TermPlot>,

    #[clap(long, help = OFF_DIAG_HELP.as_str(), help_heading = "PLOT TYPES")]
    off_diag: Option<TermPlot>,

    /// The number of rows to use in the plots. The default is determined
    /// based off of the number of antennas in the solutions.
    #[clap(long, help_heading = "PLOT LAYOUT")]
    num_rows: Option<usize>,

    /// The number of columns to use in the plots. The default is determined
    /// based off of the number of antennas in the solutions.
    #[clap(long, help_heading = "PLOT LAYOUT")]
    num_cols: Option<usize>,

    /// The width of the plots in pixels.
    #[clap(long, default_value_t = DEFAULT_WIDTH, help_heading = "PLOT LAYOUT")]
    width: u32,

    /// The height of the plots in pixels.
    #[clap(long, default_value_t = DEFAULT_HEIGHT, help_heading = "PLOT LAYOUT")]
    height: u32,

    /// The minimum y-range value on the amplitude plots. The default is the
    /// smallest amplitude in the data.
    #[clap(long, help_heading = "PLOT LIMITS")]
    min_amp: Option<f64>,

    /// The maximum y-range value on the amplitude plots. The default is the
    /// largest amplitude in the data.
    #[clap(long, help_heading = "PLOT LIMITS")]
    max_amp: Option<f64>,

    /// The largest real or imaginary value on the re/im plots; their y-ranges
    /// are symmetric around zero. The default is taken from the data.
    #[clap(long, help_heading = "PLOT LIMITS")]
    max_reim: Option<f64>,

    /// The largest phase in degrees on the phase plots; their y-ranges are
    /// symmetric around zero. The default is 180.
    #[clap(long, help_heading = "PLOT LIMITS")]
    max_phase: Option<f64>,

    /// Only plot timesteps at least this many seconds after the first one.
    #[clap(long, help_heading = "PLOT LIMITS")]
    min_time: Option<f64>,

    /// Only plot timesteps at most this many seconds after the first one.
    #[clap(long, help_heading = "PLOT LIMITS")]
    max_time: Option<f64>,

    /// Only plot channels at or above this frequency in MHz.
    #[clap(long, help_heading = "PLOT LIMITS")]
    min_freq: Option<f64>,

    /// Only plot channels at or below this frequency in MHz.
    #[clap(long, help_heading = "PLOT LIMITS")]
    max_freq: Option<f64>,

    /// The verbosity of the program. Increase by specifying multiple times
    /// (e.g. -vv). The default is to print only high-level information.
    #[clap(short, long, parse(from_occurrences))]
    verbosity: u8,
}

impl SolplotArgs {
    pub fn run(self) -> Result<(), SolplotError> {
        setup_logging(self.verbosity).expect("Failed to initialise logging.");

        info!("solplot {}", env!("CARGO_PKG_VERSION"));
        display_build_info();

        #[cfg(feature = "plotting")]
        {
            plot::plot_all_sol_files(self)?;

            info!("solplot complete.");
            Ok(())
        }

        #[cfg(not(feature = "plotting"))]
        {
            // Plotting is an optional feature, because the plotting library
            // needs system font libraries at build time. Without the feature
            // there's nothing solplot can do; the user has to compile from
            // source with it enabled.
            Err(SolplotError::from(SolutionsPlotError::NoPlottingFeature))
        }
    }
}

/// Activate a logger. All log messages are put onto `stdout`. `env_logger`
/// automatically only uses colours and fancy symbols if we're on a tty (e.g. a
/// terminal); piped output will be formatted sensibly. Source code lines are
/// displayed in log messages when verbosity >= 3.
fn setup_logging(verbosity: u8) -> Result<(), log::SetLoggerError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Stdout);
    builder.format_target(false);
    match verbosity {
        0 => builder.filter_level(log::LevelFilter::Info),
        1 => builder.filter_level(log::LevelFilter::Debug),
        2 => builder.filter_level(log::LevelFilter::Trace),
        _ => {
            builder.filter_level(log::LevelFilter::Trace);
            builder.format(|buf, record| {
                use std::io::Write;

                let timestamp = buf.timestamp();
                let level = record.level();
                let target = record.target();
                let line = record.line().unwrap_or(0);
                let message = record.args();

                writeln!(buf, "[{timestamp} {level} {target}:{line}] {message}")
            })
        }
    };
    builder.init();

    Ok(())
}

/// Write many info-level log lines of how this executable was compiled.
fn display_build_info() {
    let dirty = match GIT_DIRTY {
        Some(true) => " (dirty)",
        _ => "",
    };
    match GIT_COMMIT_HASH_SHORT {
        Some(hash) => {
            info!("Compiled on git commit hash: {hash}{dirty}");
        }
        None => info!("Compiled on git commit hash: <no git info>"),
    }
    if let Some(hr) = GIT_HEAD_REF {
        info!("            git head ref: {}", hr);
    }
    info!("            {}", BUILT_TIME_UTC);
    info!("         with compiler {}", RUSTC_VERSION);
    info!("");
}
