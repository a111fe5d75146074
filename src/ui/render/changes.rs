//! Change list and error region rendering.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use super::helpers::{kind_color, sanitize, truncate_path, KIND_LABEL_WIDTH};
use crate::core::Change;
use crate::theme::Theme;
use crate::ui::app::{App, Focus};

/// Lines for one change entry.
///
/// Every entry starts with `LABEL path`; a modified entry adds its
/// `From:` and `To:` references on the lines below.
pub fn entry_lines(
    change: &Change,
    theme: &Theme,
    selected: bool,
    width: usize,
) -> Vec<Line<'static>> {
    let bg = if selected {
        theme.bg_selected
    } else {
        theme.bg_surface
    };
    let marker = if selected { "▌" } else { " " };

    let label = format!("{:<w$}", change.label(), w = KIND_LABEL_WIDTH);
    let path_width = width.saturating_sub(KIND_LABEL_WIDTH + 2);
    let path = truncate_path(&sanitize(change.path()), path_width);

    let mut lines = vec![Line::from(vec![
        Span::styled(marker, Style::default().fg(theme.accent).bg(bg)),
        Span::styled(
            label,
            Style::default()
                .fg(kind_color(change.kind(), theme))
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled(
            path,
            Style::default()
                .fg(if selected {
                    theme.text_bright
                } else {
                    theme.text_normal
                })
                .bg(bg),
        ),
    ])
    .style(Style::default().bg(bg))];

    if let Some((from, to)) = change.from_to() {
        let indent = " ".repeat(KIND_LABEL_WIDTH + 2);
        for (key, value) in [("From: ", from), ("To: ", to)] {
            let shown = value.map(sanitize).unwrap_or_else(|| "(none)".to_string());
            lines.push(
                Line::from(vec![
                    Span::styled(indent.clone(), Style::default().bg(bg)),
                    Span::styled(key, Style::default().fg(theme.text_dim).bg(bg)),
                    Span::styled(shown, Style::default().fg(theme.text_normal).bg(bg)),
                ])
                .style(Style::default().bg(bg)),
            );
        }
    }

    lines
}

/// Number of rows an entry takes.
pub fn entry_height(change: &Change) -> usize {
    if change.from_to().is_some() {
        3
    } else {
        1
    }
}

/// Render the request error region.
pub fn render_error(frame: &mut Frame, app: &App, area: Rect) {
    let Some(message) = app.request.error.as_deref() else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(app.theme.error))
        .title(Span::styled(
            " Error ",
            Style::default()
                .fg(app.theme.error)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(app.theme.bg_surface));

    let para = Paragraph::new(Line::from(Span::styled(
        sanitize(message),
        Style::default().fg(app.theme.error),
    )))
    .wrap(Wrap { trim: true })
    .block(block);
    frame.render_widget(para, area);
}

/// Render the change list.
pub fn render_changes(frame: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.focus == Focus::Results;
    let total = app.changes().len();
    let visible = app.visible_indices();

    let title = if app.filter_active() {
        format!(" Changes ({}/{}) ", visible.len(), total)
    } else {
        format!(" Changes ({}) ", total)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if focused {
            app.theme.border_active
        } else {
            app.theme.border_dim
        }))
        .title(Span::styled(
            title,
            Style::default().fg(if focused {
                app.theme.accent
            } else {
                app.theme.text_dim
            }),
        ))
        .style(Style::default().bg(app.theme.bg_surface));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if visible.is_empty() {
        let message = if app.request.loading {
            "Comparing..."
        } else if app.filter_active() {
            "No matching changes"
        } else if app.request.error.is_none() && total == 0 {
            "No changes to show. Fill in the form and press Enter."
        } else {
            "No changes"
        };
        let para = Paragraph::new(Line::from(Span::styled(
            format!(" {}", message),
            Style::default().fg(app.theme.text_muted),
        )));
        frame.render_widget(para, inner);
        return;
    }

    let heights: Vec<(usize, usize)> = visible
        .iter()
        .filter_map(|&i| app.changes().get(i).map(|c| (i, entry_height(c))))
        .collect();
    app.scroll_to_selection(&heights, inner.height as usize);

    let width = inner.width as usize;
    let mut lines: Vec<Line> = Vec::new();
    for &idx in visible.iter().skip(app.results.scroll) {
        if lines.len() >= inner.height as usize {
            break;
        }
        let Some(change) = app.changes().get(idx) else {
            continue;
        };
        let selected = idx == app.results.selected_idx && focused;
        lines.extend(entry_lines(change, &app.theme, selected, width));
    }
    lines.truncate(inner.height as usize);

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect()
    }

    #[test]
    fn added_entry_is_one_line() {
        let change = Change::Added {
            path: "a.txt".to_string(),
        };
        let lines = entry_lines(&change, &Theme::default(), false, 80);
        let rendered = text(&lines);
        assert_eq!(rendered.len(), 1);
        assert!(rendered[0].contains("ADDED"));
        assert!(rendered[0].contains("a.txt"));
        assert!(!rendered[0].contains("From:"));
    }

    #[test]
    fn modified_entry_shows_from_and_to() {
        let change = Change::Modified {
            path: "b.txt".to_string(),
            from: Some("x".to_string()),
            to: Some("y".to_string()),
        };
        let rendered = text(&entry_lines(&change, &Theme::default(), false, 80));
        assert_eq!(rendered.len(), 3);
        assert!(rendered[0].contains("MODIFIED"));
        assert!(rendered[1].contains("From: x"));
        assert!(rendered[2].contains("To: y"));
    }

    #[test]
    fn modified_without_refs_shows_placeholder() {
        let change = Change::Modified {
            path: "b.txt".to_string(),
            from: None,
            to: None,
        };
        let rendered = text(&entry_lines(&change, &Theme::default(), false, 80));
        assert!(rendered[1].contains("(none)"));
        assert_eq!(entry_height(&change), 3);
    }
}
