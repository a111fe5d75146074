use super::{App, Focus};

impl App {
    /// Move focus to the next stop in the cycle.
    pub fn focus_next(&mut self) {
        self.set_focus(self.focus.next());
    }

    /// Move focus to the previous stop in the cycle.
    pub fn focus_prev(&mut self) {
        self.set_focus(self.focus.prev());
    }

    /// Explicitly set the UI focus.
    pub fn set_focus(&mut self, focus: Focus) {
        if self.focus != focus {
            self.focus = focus;
            self.ui.dirty = true;
        }
    }

    /// Type a character into the focused field.
    pub fn input_char(&mut self, c: char) {
        if let Focus::Field(field) = self.focus {
            self.form.get_mut(field).push(c);
            self.ui.dirty = true;
        }
    }

    /// Delete the last character of the focused field.
    pub fn input_backspace(&mut self) {
        if let Focus::Field(field) = self.focus {
            if self.form.get_mut(field).pop().is_some() {
                self.ui.dirty = true;
            }
        }
    }

    /// Move selection up in the change list.
    pub fn select_prev(&mut self) {
        let visible = self.visible_indices();
        match visible.iter().position(|&i| i == self.results.selected_idx) {
            Some(pos) if pos > 0 => self.select_index(visible[pos - 1]),
            Some(_) => {}
            None => {
                if let Some(&first) = visible.first() {
                    self.select_index(first);
                }
            }
        }
    }

    /// Move selection down in the change list.
    pub fn select_next(&mut self) {
        let visible = self.visible_indices();
        match visible.iter().position(|&i| i == self.results.selected_idx) {
            Some(pos) if pos + 1 < visible.len() => self.select_index(visible[pos + 1]),
            Some(_) => {}
            None => {
                if let Some(&first) = visible.first() {
                    self.select_index(first);
                }
            }
        }
    }

    /// Jump to the first visible change.
    pub fn select_first(&mut self) {
        if let Some(&first) = self.visible_indices().first() {
            self.select_index(first);
        }
    }

    /// Jump to the last visible change.
    pub fn select_last(&mut self) {
        if let Some(&last) = self.visible_indices().last() {
            self.select_index(last);
        }
    }

    fn select_index(&mut self, idx: usize) {
        if self.results.selected_idx != idx {
            self.results.selected_idx = idx;
            self.ui.dirty = true;
        }
    }

    /// Adjust the scroll offset so the selection fits in `height` rows,
    /// given each visible entry's row count.
    pub fn scroll_to_selection(&mut self, heights: &[(usize, usize)], height: usize) {
        let Some(pos) = heights
            .iter()
            .position(|&(idx, _)| idx == self.results.selected_idx)
        else {
            self.results.scroll = 0;
            return;
        };

        if pos < self.results.scroll {
            self.results.scroll = pos;
            return;
        }

        // Walk back from the selection until the rows no longer fit.
        let mut used = 0;
        let mut first = pos;
        loop {
            used += heights[first].1;
            if used > height || first == 0 {
                break;
            }
            if used + heights[first - 1].1 > height {
                break;
            }
            first -= 1;
        }
        if self.results.scroll < first {
            self.results.scroll = first;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        Change, CompareBackend, CompareError, CompareForm, FormField, StaticCredentials,
    };

    struct NoopBackend;

    impl CompareBackend for NoopBackend {
        fn compare(&self, _form: &CompareForm, _token: &str) -> Result<Vec<Change>, CompareError> {
            Ok(Vec::new())
        }
    }

    fn app() -> App {
        let mut app = App::with_backend(
            CompareForm::default(),
            Box::new(NoopBackend),
            Box::new(StaticCredentials::none()),
        );
        app.request.changes = ["a", "b", "c"]
            .iter()
            .map(|p| Change::Added {
                path: p.to_string(),
            })
            .collect();
        app
    }

    #[test]
    fn typing_edits_focused_field_only() {
        let mut app = app();
        app.set_focus(Focus::Field(FormField::RepoSlug));
        for c in "widgets".chars() {
            app.input_char(c);
        }
        app.input_backspace();
        assert_eq!(app.form.repo_slug, "widget");
        assert!(app.form.workspace.is_empty());

        app.set_focus(Focus::Trigger);
        app.input_char('x');
        assert_eq!(app.form.repo_slug, "widget");
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut app = app();
        app.select_prev();
        assert_eq!(app.results.selected_idx, 0);
        app.select_next();
        app.select_next();
        app.select_next();
        assert_eq!(app.results.selected_idx, 2);
        app.select_first();
        assert_eq!(app.results.selected_idx, 0);
        app.select_last();
        assert_eq!(app.results.selected_idx, 2);
    }

    #[test]
    fn scroll_follows_selection() {
        let mut app = app();
        let heights = [(0, 1), (1, 3), (2, 1)];
        app.results.selected_idx = 2;
        app.scroll_to_selection(&heights, 3);
        assert_eq!(app.results.scroll, 2);

        app.results.selected_idx = 0;
        app.scroll_to_selection(&heights, 3);
        assert_eq!(app.results.scroll, 0);
    }
}
