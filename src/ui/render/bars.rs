//! Top and bottom bar rendering.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::helpers::truncate_str;
use crate::ui::app::{App, Focus, Mode};

/// Render the top bar: title, endpoint and change counts.
pub fn render_top_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bar = Style::default().bg(app.theme.bg_elevated);

    let mut spans = vec![
        Span::styled("  ", bar),
        Span::styled(
            "commitdiff",
            bar.fg(app.theme.text_bright).add_modifier(Modifier::BOLD),
        ),
    ];

    // Right-aligned summary once there is something to count
    let mut right: Vec<Span> = Vec::new();
    if app.request.loading {
        right.push(Span::styled("comparing…  ", bar.fg(app.theme.accent)));
    } else if !app.changes().is_empty() {
        let summary = app.summary();
        right.push(Span::styled(
            format!("+{}", summary.added),
            bar.fg(app.theme.success),
        ));
        right.push(Span::styled(
            format!(" ~{}", summary.modified),
            bar.fg(app.theme.warning),
        ));
        right.push(Span::styled(
            format!(" -{}", summary.removed),
            bar.fg(app.theme.error),
        ));
        if summary.other > 0 {
            right.push(Span::styled(
                format!(" ?{}", summary.other),
                bar.fg(app.theme.text_dim),
            ));
        }
        right.push(Span::styled("  ", bar));
    }
    let right_len: usize = right.iter().map(|s| s.content.chars().count()).sum();

    if !app.endpoint.is_empty() {
        let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        let room = (area.width as usize)
            .saturating_sub(left_len + right_len + 4)
            .max(1);
        spans.push(Span::styled("  ", bar));
        spans.push(Span::styled(
            truncate_str(&app.endpoint, room),
            bar.fg(app.theme.text_muted),
        ));
    }

    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize)
        .saturating_sub(left_len)
        .saturating_sub(right_len);
    spans.push(Span::styled(" ".repeat(padding_len), bar));
    spans.extend(right);

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bar), area);
}

/// Render the bottom bar with mode-specific hints.
pub fn render_bottom_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bar = Style::default().bg(app.theme.bg_elevated);

    // Filter mode
    if app.ui.mode == Mode::FilterResults {
        let total = app.changes().len();
        let match_count = if app.filter_active() {
            app.results.filtered_indices.len()
        } else {
            total
        };
        let line = Line::from(vec![
            Span::styled(" Filter: ", bar.fg(app.theme.accent)),
            Span::styled(app.results.filter.clone(), bar.fg(app.theme.text_bright)),
            Span::styled("█", bar.fg(app.theme.accent)),
            Span::styled(
                format!(" ({}/{})", match_count, total),
                bar.fg(app.theme.text_muted),
            ),
            Span::styled("  Enter: apply  Esc: cancel", bar.fg(app.theme.text_muted)),
        ]);
        frame.render_widget(Paragraph::new(line).style(bar), area);
        return;
    }

    // Local error message
    if let Some(ref err) = app.ui.error {
        let line = Line::from(vec![
            Span::styled(" ✗ ", bar.fg(app.theme.error)),
            Span::styled(err.clone(), bar.fg(app.theme.error)),
        ]);
        frame.render_widget(Paragraph::new(line).style(bar), area);
        return;
    }

    // Status message
    if let Some(ref msg) = app.ui.status {
        let line = Line::from(vec![
            Span::styled(" ✓ ", bar.fg(app.theme.success)),
            Span::styled(msg.clone(), bar.fg(app.theme.success)),
        ]);
        frame.render_widget(Paragraph::new(line).style(bar), area);
        return;
    }

    // Key hints
    let hints: &[(&str, &str)] = match app.focus {
        Focus::Field(_) => &[
            ("⇥", "next"),
            ("↵", "compare"),
            ("^R", "compare"),
            ("esc", "quit"),
        ],
        Focus::Trigger => &[("↵/␣", "compare"), ("⇥", "next"), ("q", "quit")],
        Focus::Results => &[
            ("j/k", "navigate"),
            ("g/G", "top/bottom"),
            ("/", "filter"),
            ("y", "copy path"),
            ("^R", "compare"),
            ("q", "quit"),
        ],
    };

    let mut spans = vec![Span::styled(" ", bar)];
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", bar));
        }
        spans.push(Span::styled(
            *key,
            bar.fg(app.theme.accent).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(" {}", desc), bar.fg(app.theme.text_muted)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bar), area);
}
