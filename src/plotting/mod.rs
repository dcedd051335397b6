// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Drawing backends for figures.
//!
//! [save_png] renders a figure into an image file; the interactive terminal
//! viewer lives in [display]. Both go through [draw_figure], so a figure
//! looks the same everywhere apart from resolution.

pub(crate) mod display;
mod error;

pub(crate) use error::{DrawError, TuiError};

use std::path::Path;

use plotters::{
    coord::Shift,
    prelude::*,
    style::{Color, RGBAColor},
};

use crate::figure::{Figure, Panel};

lazy_static::lazy_static! {
    /// The palette behind series colour indices.
    static ref SERIES_COLOURS: [RGBAColor; 4] = [
        RED.mix(1.0),
        BLUE.mix(1.0),
        CYAN.mix(1.0),
        YELLOW.mix(1.0),
    ];
}

/// Draw a figure into a PNG file at its configured pixel size.
pub(crate) fn save_png(figure: &Figure, file: &Path) -> Result<(), DrawError> {
    let root = BitMapBackend::new(file, (figure.width, figure.height)).into_drawing_area();
    draw_figure(figure, &root)?;
    root.present()
        .map_err(|e| DrawError::Present(e.to_string()))?;
    Ok(())
}

/// Draw a figure onto any drawing area. The figure's pixel size is ignored
/// here; panels are split evenly over whatever area the backend provides.
pub(crate) fn draw_figure<DB: DrawingBackend>(
    figure: &Figure,
    area: &DrawingArea<DB, Shift>,
) -> Result<(), DrawError> {
    area.fill(&WHITE)
        .map_err(|e| DrawError::Layout(e.to_string()))?;

    // The coloured text for each series in the top-right corner. Labels
    // repeat across panels, so only the first occurrence is drawn.
    let mut legend: Vec<(&str, usize)> = vec![];
    for series in figure.panels.iter().flat_map(|p| p.series.iter()) {
        if !legend.iter().any(|(label, _)| *label == series.label) {
            legend.push((&series.label, series.colour));
        }
    }
    let (area_width, _) = area.dim_in_pixel();
    for (i, (label, colour)) in legend.iter().enumerate() {
        let colour = &SERIES_COLOURS[colour % SERIES_COLOURS.len()];
        let x = area_width as i32 - 180 * (legend.len() - i) as i32;
        area.draw_text(label, &("sans-serif", 38).into_font().color(colour), (x, 10))
            .map_err(|e| DrawError::Layout(e.to_string()))?;
    }

    let titled = area
        .titled(&figure.title, ("sans-serif", 60))
        .map_err(|e| DrawError::Layout(e.to_string()))?;
    let cells = titled.split_evenly((figure.num_rows, figure.num_cols));
    for (panel, cell) in figure.panels.iter().zip(cells.iter()) {
        draw_panel(figure, panel, cell)?;
    }

    Ok(())
}

/// For a single drawing area, plot one panel's series.
fn draw_panel<DB: DrawingBackend>(
    figure: &Figure,
    panel: &Panel,
    cell: &DrawingArea<DB, Shift>,
) -> Result<(), DrawError> {
    let mut builder = ChartBuilder::on(cell);
    builder
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(45);
    if !panel.caption.is_empty() {
        builder.caption(&panel.caption, ("sans-serif", 30));
    }
    let mut cc = builder
        .build_cartesian_2d(
            figure.x_range.0..figure.x_range.1,
            panel.y_range.0..panel.y_range.1,
        )
        .map_err(|e| DrawError::Panel(e.to_string()))?;

    let mut mesh = cc.configure_mesh();
    mesh.light_line_style(&WHITE).x_desc(figure.x_label);
    if let Some(y_label) = panel.y_label {
        mesh.y_desc(y_label);
    }
    mesh.draw().map_err(|e| DrawError::Panel(e.to_string()))?;

    // Nothing to show, e.g. a fully flagged antenna. Grey the panel out.
    if panel.series.iter().all(|s| s.points.is_empty()) {
        cc.plotting_area()
            .fill(&RGBColor(220, 220, 220))
            .map_err(|e| DrawError::Panel(e.to_string()))?;
        return Ok(());
    }

    for series in &panel.series {
        let colour = &SERIES_COLOURS[series.colour % SERIES_COLOURS.len()];
        cc.draw_series(PointSeries::of_element(
            series.points.iter().copied(),
            1,
            ShapeStyle::from(colour).filled(),
            &|coord, size, style| EmptyElement::at(coord) + Circle::new((0, 0), size, style),
        ))
        .map_err(|e| DrawError::Panel(e.to_string()))?;
    }

    Ok(())
}
