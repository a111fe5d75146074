//! Shared rendering helpers and constants.

use ratatui::style::Color;

use crate::core::ChangeKind;
use crate::theme::Theme;

/// Width of the label column in the form panel.
pub const FIELD_LABEL_WIDTH: usize = 17;

/// Width of the change-type column in the result list.
pub const KIND_LABEL_WIDTH: usize = 9;

/// Color for a change kind.
pub fn kind_color(kind: ChangeKind, theme: &Theme) -> Color {
    match kind {
        ChangeKind::Added => theme.success,
        ChangeKind::Modified => theme.warning,
        ChangeKind::Removed => theme.error,
        ChangeKind::Other => theme.text_dim,
    }
}

/// Sanitize control characters.
pub fn sanitize(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\x00'..='\x1f' | '\x7f' => '\u{FFFD}',
            _ => c,
        })
        .collect()
}

/// Truncate from the right with an ellipsis.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else if max_len == 0 {
        String::new()
    } else {
        let truncated: String = s.chars().take(max_len - 1).collect();
        format!("{}…", truncated)
    }
}

/// Truncate a path from the left so the file name stays visible.
pub fn truncate_path(path: &str, max_len: usize) -> String {
    let char_count = path.chars().count();
    if char_count <= max_len {
        path.to_string()
    } else if max_len == 0 {
        String::new()
    } else {
        let skip = char_count - max_len + 1;
        let truncated: String = path.chars().skip(skip).collect();
        format!("…{}", truncated)
    }
}

/// Keep the tail of an input value visible when it overflows.
pub fn tail(s: &str, max_len: usize) -> &str {
    let char_count = s.chars().count();
    if char_count <= max_len {
        return s;
    }
    let skip = char_count - max_len;
    match s.char_indices().nth(skip) {
        Some((byte_idx, _)) => &s[byte_idx..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_str_adds_ellipsis() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 6), "hello…");
        assert_eq!(truncate_str("hello", 0), "");
    }

    #[test]
    fn truncate_path_keeps_file_name() {
        assert_eq!(truncate_path("src/a.rs", 20), "src/a.rs");
        assert_eq!(truncate_path("src/components/Compare.tsx", 12), "…Compare.tsx");
    }

    #[test]
    fn tail_is_char_aware() {
        assert_eq!(tail("abcdef", 3), "def");
        assert_eq!(tail("ab", 3), "ab");
        assert_eq!(tail("äöüß", 2), "üß");
    }

    #[test]
    fn sanitize_replaces_controls() {
        assert_eq!(sanitize("a\tb\n"), "a\u{FFFD}b\u{FFFD}");
    }
}
