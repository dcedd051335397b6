// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! An interactive terminal viewer for figures.

use std::io;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    backend::CrosstermBackend,
    widgets::{Block, Borders},
    Terminal,
};

use super::{draw_figure, TuiError};
use crate::figure::Figure;

/// Show figures one page at a time in the terminal. Blocks until the user
/// quits the viewer.
pub(crate) fn present_all(figures: &[Figure]) -> Result<(), TuiError> {
    if figures.is_empty() {
        return Ok(());
    }

    let _guard = TerminalGuard::new()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    let mut current = 0;
    loop {
        let figure = &figures[current];
        terminal.draw(|frame| {
            let title = format!(
                " {} ({}/{}; arrows cycle, q quits) ",
                figure.title,
                current + 1,
                figures.len()
            );
            let block = Block::default().borders(Borders::ALL).title(title);
            let inner = block.inner(frame.area());
            frame.render_widget(block, frame.area());
            let chart = widget_fn(|root| {
                // A failed draw leaves the page blank; the viewer keeps
                // running.
                let _ = draw_figure(figure, &root);
                Ok(())
            });
            frame.render_widget(chart, inner);
        })?;

        // Block until a key press decides the next page. Resizes fall
        // through to a redraw.
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
                    current = (current + 1) % figures.len();
                }
                KeyCode::Left | KeyCode::Char('h') => {
                    current = (current + figures.len() - 1) % figures.len();
                }
                _ => (),
            },
            _ => (),
        }
    }

    Ok(())
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<TerminalGuard, TuiError> {
        enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(TuiError::from(e));
        }
        Ok(TerminalGuard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}
