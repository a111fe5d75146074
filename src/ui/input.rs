//! Input handling.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{App, Focus, Mode};

/// Handle a crossterm event.
/// Returns true if the event was handled.
pub fn handle_input(app: &mut App, event: Event) -> bool {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Resize(_, _) => {
            app.mark_dirty();
            true
        }
        _ => false,
    }
}

/// Handle a key event.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Bottom-bar messages last until the next key.
    app.clear_messages();

    if ctrl && key.code == KeyCode::Char('c') {
        app.quit();
        return true;
    }

    if app.ui.mode == Mode::FilterResults {
        return handle_filter_key(app, key);
    }

    // Global keys
    match key.code {
        KeyCode::Char('r') if ctrl => {
            app.submit();
            return true;
        }
        KeyCode::Esc => {
            app.quit();
            return true;
        }
        KeyCode::Tab => {
            app.focus_next();
            return true;
        }
        KeyCode::BackTab => {
            app.focus_prev();
            return true;
        }
        _ => {}
    }

    // Focus-specific keys
    match app.focus {
        Focus::Field(_) => handle_field_key(app, key),
        Focus::Trigger => handle_trigger_key(app, key),
        Focus::Results => handle_results_key(app, key),
    }
}

/// Handle keys when a form input is focused.
fn handle_field_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter => {
            app.submit();
            true
        }
        KeyCode::Down => {
            app.focus_next();
            true
        }
        KeyCode::Up => {
            app.focus_prev();
            true
        }
        KeyCode::Backspace => {
            app.input_backspace();
            true
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.input_char(c);
            true
        }
        _ => false,
    }
}

/// Handle keys when the compare button is focused.
fn handle_trigger_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.submit();
            true
        }
        KeyCode::Down => {
            app.focus_next();
            true
        }
        KeyCode::Up => {
            app.focus_prev();
            true
        }
        KeyCode::Char('q') => {
            app.quit();
            true
        }
        _ => false,
    }
}

/// Handle keys when the change list is focused.
fn handle_results_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.select_next();
            true
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_prev();
            true
        }
        KeyCode::Char('g') | KeyCode::Home => {
            app.select_first();
            true
        }
        KeyCode::Char('G') | KeyCode::End => {
            app.select_last();
            true
        }
        KeyCode::Char('/') => {
            app.start_filter();
            true
        }
        KeyCode::Char('y') => {
            app.copy_selected_path();
            true
        }
        KeyCode::Char('q') => {
            app.quit();
            true
        }
        _ => false,
    }
}

/// Handle keys while typing a filter.
fn handle_filter_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            app.cancel_filter();
            true
        }
        KeyCode::Enter => {
            app.apply_filter();
            true
        }
        KeyCode::Backspace => {
            app.filter_pop();
            true
        }
        KeyCode::Char(c) => {
            app.filter_push(c);
            true
        }
        _ => false,
    }
}
