use super::{App, Mode};
use crate::core::Change;

impl App {
    /// Start filtering the change list.
    pub fn start_filter(&mut self) {
        self.ui.mode = Mode::FilterResults;
        self.results.filter.clear();
        self.results.filtered_indices.clear();
        self.ui.dirty = true;
    }

    /// Apply the current filter query and return to normal mode.
    pub fn apply_filter(&mut self) {
        self.recompute_filter();
        self.ui.mode = Mode::Normal;
        self.ui.dirty = true;
    }

    fn recompute_filter(&mut self) {
        let query = self.results.filter.trim();
        if query.is_empty() {
            self.results.filtered_indices.clear();
        } else {
            self.results.filtered_indices = self
                .fuzzy_matcher
                .filter_changes(query, &self.request.changes);
        }

        if let Some(&first) = self.results.filtered_indices.first() {
            if !self
                .results
                .filtered_indices
                .contains(&self.results.selected_idx)
            {
                self.results.selected_idx = first;
            }
        }
        self.results.scroll = 0;
    }

    /// Append a character to the filter and refilter.
    pub fn filter_push(&mut self, c: char) {
        self.results.filter.push(c);
        self.update_filter_live();
    }

    /// Remove the last filter character and refilter.
    pub fn filter_pop(&mut self) {
        self.results.filter.pop();
        self.update_filter_live();
    }

    /// Update filter live as user types.
    pub fn update_filter_live(&mut self) {
        self.recompute_filter();
        self.ui.dirty = true;
    }

    /// Cancel filter and restore full list.
    pub fn cancel_filter(&mut self) {
        self.ui.mode = Mode::Normal;
        self.results.filter.clear();
        self.results.filtered_indices.clear();
        self.ui.dirty = true;
    }

    /// Whether a non-empty filter query is in effect.
    pub fn filter_active(&self) -> bool {
        !self.results.filter.trim().is_empty()
    }

    /// Indices of visible changes, in display order.
    pub fn visible_indices(&self) -> Vec<usize> {
        if self.filter_active() {
            self.results.filtered_indices.clone()
        } else {
            (0..self.request.changes.len()).collect()
        }
    }

    /// Get visible changes (filtered or all).
    pub fn visible_changes(&self) -> Vec<(usize, &Change)> {
        self.visible_indices()
            .into_iter()
            .filter_map(|i| self.request.changes.get(i).map(|c| (i, c)))
            .collect()
    }
}
