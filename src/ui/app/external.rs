use super::App;
use arboard::Clipboard;

impl App {
    /// Copy the selected change's path to the clipboard.
    ///
    /// Does nothing but report an error when the selection is hidden by the
    /// results filter.
    pub fn copy_selected_path(&mut self) {
        let visible = self.visible_indices().contains(&self.results.selected_idx);
        let path = self
            .selected_change()
            .filter(|_| visible)
            .map(|c| c.path().to_string());
        let Some(path) = path else {
            self.ui.error = Some("No change selected to copy".to_string());
            self.ui.dirty = true;
            return;
        };

        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(path.clone()) {
                    self.ui.error = Some(format!("Clipboard error: {}", e));
                } else {
                    self.ui.error = None;
                    self.ui.status = Some(format!("Copied {} to clipboard", path));
                }
            }
            Err(e) => {
                self.ui.error = Some(format!("Clipboard unavailable: {}", e));
            }
        }

        self.ui.dirty = true;
    }
}
