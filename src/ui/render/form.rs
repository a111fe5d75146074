//! Form panel: the four inputs and the compare button.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::helpers::{sanitize, tail, FIELD_LABEL_WIDTH};
use crate::core::FormField;
use crate::ui::app::{App, Focus};

/// Rows needed by the form panel, borders included.
pub const FORM_HEIGHT: u16 = FormField::ALL.len() as u16 + 4;

/// Render the form panel.
pub fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let in_form = matches!(app.focus, Focus::Field(_) | Focus::Trigger);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if in_form {
            app.theme.border_active
        } else {
            app.theme.border_dim
        }))
        .title(Span::styled(
            " Compare ",
            Style::default().fg(if in_form {
                app.theme.accent
            } else {
                app.theme.text_dim
            }),
        ))
        .style(Style::default().bg(app.theme.bg_surface));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let value_width = (inner.width as usize).saturating_sub(FIELD_LABEL_WIDTH + 3);
    let mut lines: Vec<Line> = FormField::ALL
        .iter()
        .map(|&field| field_line(app, field, value_width))
        .collect();
    lines.push(Line::default());
    lines.push(trigger_line(app));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn field_line(app: &App, field: FormField, value_width: usize) -> Line<'static> {
    let focused = app.focus == Focus::Field(field);
    let theme = &app.theme;

    let label_style = if focused {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text_dim)
    };

    let value = sanitize(app.form.get(field));
    // Leave a column for the cursor.
    let shown = tail(&value, value_width.saturating_sub(1)).to_string();

    let mut spans = vec![
        Span::styled(if focused { "›" } else { " " }, label_style),
        Span::styled(
            format!(" {:<w$}", field.label(), w = FIELD_LABEL_WIDTH),
            label_style,
        ),
        Span::styled(" ", Style::default()),
        Span::styled(
            shown,
            Style::default().fg(if focused {
                theme.text_bright
            } else {
                theme.text_normal
            }),
        ),
    ];

    if focused {
        spans.push(Span::styled("█", Style::default().fg(theme.accent)));
    } else if value.is_empty() {
        spans.push(Span::styled("-", Style::default().fg(theme.text_muted)));
    }

    Line::from(spans)
}

fn trigger_line(app: &App) -> Line<'static> {
    let theme = &app.theme;
    let focused = app.focus == Focus::Trigger;
    let label = format!(" {} ", app.trigger_label());

    let style = if !app.trigger_enabled() {
        Style::default()
            .fg(theme.text_muted)
            .bg(theme.bg_elevated)
            .add_modifier(Modifier::ITALIC)
    } else if focused {
        Style::default()
            .fg(theme.bg_dark)
            .bg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.accent).bg(theme.bg_elevated)
    };

    Line::from(vec![
        Span::styled(if focused { "›" } else { " " }, Style::default().fg(theme.accent)),
        Span::raw(" ".repeat(FIELD_LABEL_WIDTH + 2)),
        Span::styled(label, style),
    ])
}
