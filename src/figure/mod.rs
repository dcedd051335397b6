// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turning gain solutions into figures.
//!
//! Everything in this module is pure data extraction. A [Figure] describes
//! panels, point series and axis ranges, with colours given as palette
//! indices; backends elsewhere turn figures into pixels.


use itertools::Itertools;
use log::warn;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::c64;
use crate::classify::PlotFamily;
use crate::solutions::GainSolutions;

/// The number of X pixels on the plots.
pub(crate) const DEFAULT_WIDTH: u32 = 3200;
/// The number of Y pixels on the plots.
pub(crate) const DEFAULT_HEIGHT: u32 = 1800;

/// How many antennas go on one row when each antenna has a single panel.
const AUTO_COLS: usize = 4;

/// More cross sections than this per panel usually means the user wants a
/// narrower time or frequency window.
const MAX_OVERPLOT: usize = 100;

/// Indices of the diagonal correlations within the four-correlation axis.
const DIAG_TERMS: [usize; 2] = [0, 3];
const DIAG_TERM_NAMES: [&str; 2] = ["RR", "LL"];

/// Indices of the off-diagonal correlations.
const OFFDIAG_TERMS: [usize; 2] = [1, 2];
const OFFDIAG_TERM_NAMES: [&str; 2] = ["RL", "LR"];

lazy_static::lazy_static! {
    /// A comma-separated string of all types of [TermPlot], for help text.
    pub(crate) static ref TERM_PLOT_MODES: String = TermPlot::iter().join(", ");
}

/// How the correlations of a 2x2 solution term get plotted.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, EnumIter, EnumString)]
pub enum TermPlot {
    /// Real and imaginary parts on one panel.
    #[strum(serialize = "ri")]
    ReIm,

    /// Amplitudes and phases on a stacked pair of panels.
    #[strum(serialize = "ap")]
    AmpPhase,

    /// Not plotted at all.
    #[strum(serialize = "none")]
    None,
}

impl TermPlot {
    fn num_panels(self) -> usize {
        match self {
            TermPlot::AmpPhase => 2,
            TermPlot::ReIm => 1,
            TermPlot::None => 0,
        }
    }
}

/// User-supplied plot limits. `None` means derive a limit from the data.
/// Time windows are seconds relative to the first timestep; frequency
/// windows are MHz.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct UserLimits {
    pub(crate) min_amp: Option<f64>,
    pub(crate) max_amp: Option<f64>,
    pub(crate) max_reim: Option<f64>,
    pub(crate) max_phase: Option<f64>,
    pub(crate) min_time: Option<f64>,
    pub(crate) max_time: Option<f64>,
    pub(crate) min_freq: Option<f64>,
    pub(crate) max_freq: Option<f64>,
}

/// The size and grid layout of a figure.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PlotGeometry {
    pub(crate) num_rows: Option<usize>,
    pub(crate) num_cols: Option<usize>,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl Default for PlotGeometry {
    fn default() -> Self {
        Self {
            num_rows: None,
            num_cols: None,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

/// Everything one render call needs. Nothing here changes mid-render, so
/// two renders with the same config and solutions give the same figure.
#[derive(Debug, Clone)]
pub(crate) struct RenderConfig {
    /// Drawn across the top of the figure.
    pub(crate) title: String,

    /// How to plot the diagonal correlations.
    pub(crate) diag: TermPlot,

    /// How to plot the off-diagonal correlations.
    pub(crate) offdiag: TermPlot,

    pub(crate) geometry: PlotGeometry,
    pub(crate) limits: UserLimits,
}

impl RenderConfig {
    /// A config with the family's default term modes. Gains and bandpasses
    /// are usually inspected as amplitude and phase, leakages as small
    /// re/im values around zero.
    pub(crate) fn for_family(
        family: PlotFamily,
        user_diag: Option<TermPlot>,
        user_offdiag: Option<TermPlot>,
    ) -> RenderConfig {
        let (default_diag, default_offdiag) = match family {
            PlotFamily::Gain | PlotFamily::Bandpass => (TermPlot::AmpPhase, TermPlot::None),
            PlotFamily::Leakage => (TermPlot::None, TermPlot::ReIm),
        };
        RenderConfig {
            title: String::new(),
            diag: user_diag.unwrap_or(default_diag),
            offdiag: user_offdiag.unwrap_or(default_offdiag),
            geometry: PlotGeometry::default(),
            limits: UserLimits::default(),
        }
    }
}

/// A complete multi-panel figure, ready for any drawing backend.
#[derive(Debug)]
pub(crate) struct Figure {
    pub(crate) title: String,
    pub(crate) x_label: &'static str,
    pub(crate) x_range: (f64, f64),
    pub(crate) num_rows: usize,
    pub(crate) num_cols: usize,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) panels: Vec<Panel>,
}

/// One cell in the figure grid.
#[derive(Debug)]
pub(crate) struct Panel {
    /// Empty captions are not drawn. The phase half of an amp-phase pair
    /// leaves its caption empty so the pair reads as one unit.
    pub(crate) caption: String,
    pub(crate) y_label: Option<&'static str>,
    pub(crate) y_range: (f64, f64),
    pub(crate) series: Vec<Series>,
}

/// The points of one correlation quantity in one panel. The colour is an
/// index into the drawing palette, not a colour itself.
#[derive(Debug)]
pub(crate) struct Series {
    pub(crate) label: String,
    pub(crate) colour: usize,
    pub(crate) points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum XAxis {
    TimeHours,
    FreqMegahertz,
}

/// How a plot family extracts its figure.
#[derive(Debug, Clone, Copy)]
pub(crate) enum FamilyRenderer {
    Gain,
    Bandpass,
    Leakage,
}

impl From<PlotFamily> for FamilyRenderer {
    fn from(family: PlotFamily) -> FamilyRenderer {
        match family {
            PlotFamily::Gain => FamilyRenderer::Gain,
            PlotFamily::Bandpass => FamilyRenderer::Bandpass,
            PlotFamily::Leakage => FamilyRenderer::Leakage,
        }
    }
}

impl FamilyRenderer {
    /// The leading word of panel captions and figure titles.
    pub(crate) fn caption_noun(self) -> &'static str {
        match self {
            FamilyRenderer::Gain => "Gain",
            FamilyRenderer::Bandpass => "Bandpass",
            FamilyRenderer::Leakage => "Leakage",
        }
    }

    fn offdiag_caption_noun(self) -> &'static str {
        match self {
            FamilyRenderer::Gain => "Offdiag gain",
            FamilyRenderer::Bandpass => "Offdiag bandpass",
            FamilyRenderer::Leakage => "Offdiag leakage",
        }
    }

    /// Gains are plotted against time; bandpasses and leakages against
    /// frequency.
    fn x_axis(self) -> XAxis {
        match self {
            FamilyRenderer::Gain => XAxis::TimeHours,
            FamilyRenderer::Bandpass | FamilyRenderer::Leakage => XAxis::FreqMegahertz,
        }
    }

    /// Extract a figure from the solutions. This cannot fail; panels with
    /// nothing to show come out with empty series, and backends grey them
    /// out.
    pub(crate) fn render(self, sols: &GainSolutions, config: &RenderConfig) -> Figure {
        let (num_times, num_chans, num_ants, _) = sols.gains.dim();
        let x_axis = self.x_axis();

        // Window the time and frequency axes. Both selections apply to all
        // families; only the x axis differs.
        let t0 = sols.times.first().copied().unwrap_or(0.0);
        let time_sel: Vec<usize> = (0..num_times)
            .filter(|&t| {
                let rel = sols.times[t] - t0;
                config.limits.min_time.map_or(true, |lo| rel >= lo)
                    && config.limits.max_time.map_or(true, |hi| rel <= hi)
            })
            .collect();
        let chan_sel: Vec<usize> = (0..num_chans)
            .filter(|&c| {
                let mhz = sols.freqs[c] / 1e6;
                config.limits.min_freq.map_or(true, |lo| mhz >= lo)
                    && config.limits.max_freq.map_or(true, |hi| mhz <= hi)
            })
            .collect();
        if time_sel.is_empty() {
            warn!("The time selection excludes all timesteps");
        }
        if chan_sel.is_empty() {
            warn!("The frequency selection excludes all channels");
        }
        let num_cross = match x_axis {
            XAxis::TimeHours => chan_sel.len(),
            XAxis::FreqMegahertz => time_sel.len(),
        };
        if num_cross > MAX_OVERPLOT {
            warn!("Overplotting {num_cross} cross sections per panel; the plots will be crowded");
        }

        let panels_per_ant = config.diag.num_panels() + config.offdiag.num_panels();
        if panels_per_ant == 0 {
            warn!("Diagonal and off-diagonal plotting are both disabled; the figure will be empty");
        }

        // One pass over the selected data for the y limits. Amplitude
        // limits are shared between the diagonal and off-diagonal panels,
        // as are the re/im limits.
        let mut amp_min = f64::INFINITY;
        let mut amp_max = 0.0_f64;
        let mut reim_max = 0.0_f64;
        for (terms, mode) in [(DIAG_TERMS, config.diag), (OFFDIAG_TERMS, config.offdiag)] {
            if mode == TermPlot::None {
                continue;
            }
            for &t in &time_sel {
                for &c in &chan_sel {
                    for a in 0..num_ants {
                        for corr in terms {
                            let g = sols.gains[(t, c, a, corr)];
                            match mode {
                                TermPlot::AmpPhase => {
                                    let amp = g.norm();
                                    if amp.is_nan() {
                                        continue;
                                    }
                                    if amp < amp_min {
                                        amp_min = amp;
                                    }
                                    if amp > amp_max {
                                        amp_max = amp;
                                    }
                                }
                                TermPlot::ReIm => {
                                    for v in [g.re.abs(), g.im.abs()] {
                                        if !v.is_nan() && v > reim_max {
                                            reim_max = v;
                                        }
                                    }
                                }
                                TermPlot::None => (),
                            }
                        }
                    }
                }
            }
        }

        let uses_amp =
            config.diag == TermPlot::AmpPhase || config.offdiag == TermPlot::AmpPhase;
        let uses_reim = config.diag == TermPlot::ReIm || config.offdiag == TermPlot::ReIm;
        let amp_bounds = if uses_amp {
            amp_range(amp_min, amp_max, config.limits.min_amp, config.limits.max_amp)
        } else {
            (0.0, 1.0)
        };
        let reim_bounds = if uses_reim {
            reim_range(reim_max, config.limits.max_reim)
        } else {
            (-1.0, 1.0)
        };
        let phase_bounds = phase_range(config.limits.max_phase);

        let x_of = |t: usize, c: usize| -> f64 {
            match x_axis {
                XAxis::TimeHours => (sols.times[t] - t0) / 3600.0,
                XAxis::FreqMegahertz => sols.freqs[c] / 1e6,
            }
        };
        let xs: Vec<f64> = match x_axis {
            XAxis::TimeHours => time_sel
                .iter()
                .map(|&t| (sols.times[t] - t0) / 3600.0)
                .collect(),
            XAxis::FreqMegahertz => chan_sel.iter().map(|&c| sols.freqs[c] / 1e6).collect(),
        };
        let x_range = axis_range(&xs);

        let (num_rows, num_cols, max_ants) =
            grid_geometry(&config.geometry, num_ants, panels_per_ant);

        let mut panels = Vec::with_capacity(max_ants * panels_per_ant);
        for ant in 0..max_ants {
            let ant_name = &sols.ant_names[ant];
            for (terms, term_names, mode, offdiag) in [
                (DIAG_TERMS, DIAG_TERM_NAMES, config.diag, false),
                (OFFDIAG_TERMS, OFFDIAG_TERM_NAMES, config.offdiag, true),
            ] {
                let noun = if offdiag {
                    self.offdiag_caption_noun()
                } else {
                    self.caption_noun()
                };
                let caption = format!("{noun} antenna {ant_name}");
                match mode {
                    TermPlot::None => (),
                    TermPlot::AmpPhase => {
                        let mut amp_series = vec![];
                        let mut phase_series = vec![];
                        for (slot, (&corr, name)) in terms.iter().zip(term_names).enumerate() {
                            amp_series.push(Series {
                                label: format!("|{name}|"),
                                colour: slot,
                                points: points_of(sols, &time_sel, &chan_sel, ant, corr, &x_of, |g| {
                                    g.norm()
                                }),
                            });
                            phase_series.push(Series {
                                label: format!("{name} phase"),
                                colour: 2 + slot,
                                points: points_of(sols, &time_sel, &chan_sel, ant, corr, &x_of, |g| {
                                    g.arg().to_degrees()
                                }),
                            });
                        }
                        panels.push(Panel {
                            caption,
                            y_label: Some("Amplitude"),
                            y_range: amp_bounds,
                            series: amp_series,
                        });
                        panels.push(Panel {
                            caption: String::new(),
                            y_label: Some("Phase (deg)"),
                            y_range: phase_bounds,
                            series: phase_series,
                        });
                    }
                    TermPlot::ReIm => {
                        let mut series = vec![];
                        for (slot, (&corr, name)) in terms.iter().zip(term_names).enumerate() {
                            series.push(Series {
                                label: format!("Re {name}"),
                                colour: slot * 2,
                                points: points_of(sols, &time_sel, &chan_sel, ant, corr, &x_of, |g| {
                                    g.re
                                }),
                            });
                            series.push(Series {
                                label: format!("Im {name}"),
                                colour: slot * 2 + 1,
                                points: points_of(sols, &time_sel, &chan_sel, ant, corr, &x_of, |g| {
                                    g.im
                                }),
                            });
                        }
                        panels.push(Panel {
                            caption,
                            y_label: None,
                            y_range: reim_bounds,
                            series,
                        });
                    }
                }
            }
        }

        Figure {
            title: config.title.clone(),
            x_label: match x_axis {
                XAxis::TimeHours => "Time (h)",
                XAxis::FreqMegahertz => "Frequency (MHz)",
            },
            x_range,
            num_rows,
            num_cols,
            width: config.geometry.width,
            height: config.geometry.height,
            panels,
        }
    }
}

/// The (x, y) points of one quantity of one correlation. Flagged data is
/// NaN and gets dropped here, so a fully flagged antenna produces empty
/// series.
fn points_of<Fx, Fy>(
    sols: &GainSolutions,
    time_sel: &[usize],
    chan_sel: &[usize],
    ant: usize,
    corr: usize,
    x_of: &Fx,
    y_of: Fy,
) -> Vec<(f64, f64)>
where
    Fx: Fn(usize, usize) -> f64,
    Fy: Fn(c64) -> f64,
{
    let mut points = vec![];
    for &t in time_sel {
        for &c in chan_sel {
            let g = sols.gains[(t, c, ant, corr)];
            if g.re.is_nan() || g.im.is_nan() {
                continue;
            }
            let y = y_of(g);
            if y.is_nan() {
                continue;
            }
            points.push((x_of(t, c), y));
        }
    }
    points
}

/// From the user's grid overrides, work out the panel grid and how many
/// antennas fit in it. Each antenna takes `panels_per_ant` consecutive
/// cells, so an odd column count can wrap an antenna across rows.
fn grid_geometry(
    geometry: &PlotGeometry,
    num_ants: usize,
    panels_per_ant: usize,
) -> (usize, usize, usize) {
    if num_ants == 0 || panels_per_ant == 0 {
        return (1, 1, 0);
    }

    let num_cols = geometry
        .num_cols
        .unwrap_or_else(|| panels_per_ant * std::cmp::max(1, AUTO_COLS / panels_per_ant))
        .max(1);
    let total_panels = num_ants * panels_per_ant;
    let num_rows = geometry
        .num_rows
        .unwrap_or((total_panels + num_cols - 1) / num_cols)
        .max(1);

    let capacity = (num_rows * num_cols) / panels_per_ant;
    let max_ants = std::cmp::min(num_ants, capacity);
    if max_ants < num_ants {
        warn!(
            "Not enough rows to plot everything; only the first {max_ants} of {num_ants} antennas will be plotted"
        );
    }
    (num_rows, num_cols, max_ants)
}

/// Amplitude panel limits from the data extrema and any user overrides.
fn amp_range(
    data_min: f64,
    data_max: f64,
    user_min: Option<f64>,
    user_max: Option<f64>,
) -> (f64, f64) {
    let (min, max) = match (user_min, user_max) {
        (Some(user_min), Some(user_max)) => (user_min, user_max),
        _ => {
            // Check any user-specified limits. Are they sensible relative
            // to the data?
            let min = match user_min {
                Some(user_min) if user_min > data_max => {
                    warn!(
                        "User-specified plot minimum {user_min} is larger than all data; ignoring"
                    );
                    data_min
                }
                Some(user_min) => user_min,
                None => data_min,
            };
            let max = match user_max {
                Some(user_max) if user_max < data_min => {
                    warn!(
                        "User-specified plot maximum {user_max} is smaller than all data; ignoring"
                    );
                    data_max
                }
                Some(user_max) => user_max,
                None => data_max,
            };
            (min, max)
        }
    };

    // Failing all else, make sure the limits are sensible.
    let min = if min.is_infinite() { 0.0 } else { min };
    let max = if max.abs() < f64::EPSILON { 1.0 } else { max };
    if (max - min).abs() < f64::EPSILON {
        (min, min + 1.0)
    } else {
        (min, max)
    }
}

/// Re/im panels are symmetric about zero.
fn reim_range(data_max: f64, user_max: Option<f64>) -> (f64, f64) {
    let max = match user_max {
        Some(user_max) => user_max.abs(),
        None => data_max,
    };
    let max = if max < f64::EPSILON { 1.0 } else { max };
    (-max, max)
}

/// Phases always span a fixed range so flat phase solutions look flat.
fn phase_range(user_max: Option<f64>) -> (f64, f64) {
    let max = match user_max {
        Some(user_max) if user_max.abs() > f64::EPSILON => user_max.abs(),
        Some(user_max) => {
            warn!("User-specified maximum phase {user_max} makes an empty range; ignoring");
            180.0
        }
        None => 180.0,
    };
    (-max, max)
}

/// The plotted x extent of some values. Empty or degenerate selections get
/// a unit range.
fn axis_range(values: &[f64]) -> (f64, f64) {
    let (min, max) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (if v < lo { v } else { lo }, if v > hi { v } else { hi })
        });
    if !min.is_finite() || !max.is_finite() {
        (0.0, 1.0)
    } else if (max - min).abs() < f64::EPSILON {
        (min, min + 1.0)
    } else {
        (min, max)
    }
}
