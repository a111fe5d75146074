//! UI rendering with ratatui.
//!
//! Layout, top to bottom: title bar, compare form, error region (only while
//! an error is set), change list, hint bar.

mod bars;
mod changes;
mod form;
mod helpers;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
    Frame,
};

use super::app::App;

pub use changes::{entry_height, entry_lines};

/// Rows used by the error region, borders included.
const ERROR_HEIGHT: u16 = 4;

/// Main render function.
pub fn render(frame: &mut Frame, app: &mut App) {
    let _timer = crate::metrics::Timer::start("render_frame");

    // Fill background
    let bg_block = Block::default().style(Style::default().bg(app.theme.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Top bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Bottom bar
        ])
        .split(frame.area());

    bars::render_top_bar(frame, app, chunks[0]);
    render_main(frame, app, chunks[1]);
    bars::render_bottom_bar(frame, app, chunks[2]);
}

fn render_main(frame: &mut Frame, app: &mut App, area: Rect) {
    let error_height = if app.request.error.is_some() {
        ERROR_HEIGHT
    } else {
        0
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(form::FORM_HEIGHT),
            Constraint::Length(error_height),
            Constraint::Min(0),
        ])
        .split(area);

    form::render_form(frame, app, chunks[0]);
    if error_height > 0 {
        changes::render_error(frame, app, chunks[1]);
    }
    changes::render_changes(frame, app, chunks[2]);
}
