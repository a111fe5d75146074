//! File change records returned by the compare endpoint.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of change, without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// File was added between the two commits.
    Added,
    /// File content changed between the two commits.
    Modified,
    /// File was removed between the two commits.
    Removed,
    /// Any other change type reported by the backend.
    Other,
}

/// One file's difference between two commits.
///
/// The backend sends a flat `{ type, path, from?, to? }` record; only the
/// `modified` variant carries the before/after references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireChange", into = "WireChange")]
pub enum Change {
    /// `type: "added"`.
    Added {
        /// Path of the added file.
        path: String,
    },
    /// `type: "modified"`.
    Modified {
        /// Path of the modified file.
        path: String,
        /// Content reference before the change.
        from: Option<String>,
        /// Content reference after the change.
        to: Option<String>,
    },
    /// `type: "removed"`.
    Removed {
        /// Path of the removed file.
        path: String,
    },
    /// Unrecognized `type`, kept verbatim.
    Other {
        /// Raw type string from the backend.
        kind: String,
        /// Path of the file.
        path: String,
    },
}

/// Wire shape of a change record.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireChange {
    #[serde(rename = "type")]
    kind: String,
    path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    to: Option<String>,
}

impl From<WireChange> for Change {
    fn from(wire: WireChange) -> Self {
        let WireChange {
            kind,
            path,
            from,
            to,
        } = wire;
        match kind.as_str() {
            "added" => Change::Added { path },
            "modified" => Change::Modified { path, from, to },
            "removed" => Change::Removed { path },
            _ => Change::Other { kind, path },
        }
    }
}

impl From<Change> for WireChange {
    fn from(change: Change) -> Self {
        match change {
            Change::Added { path } => WireChange {
                kind: "added".to_string(),
                path,
                from: None,
                to: None,
            },
            Change::Modified { path, from, to } => WireChange {
                kind: "modified".to_string(),
                path,
                from,
                to,
            },
            Change::Removed { path } => WireChange {
                kind: "removed".to_string(),
                path,
                from: None,
                to: None,
            },
            Change::Other { kind, path } => WireChange {
                kind,
                path,
                from: None,
                to: None,
            },
        }
    }
}

impl Change {
    /// Path of the changed file.
    pub fn path(&self) -> &str {
        match self {
            Change::Added { path }
            | Change::Modified { path, .. }
            | Change::Removed { path }
            | Change::Other { path, .. } => path,
        }
    }

    /// Kind of change.
    pub fn kind(&self) -> ChangeKind {
        match self {
            Change::Added { .. } => ChangeKind::Added,
            Change::Modified { .. } => ChangeKind::Modified,
            Change::Removed { .. } => ChangeKind::Removed,
            Change::Other { .. } => ChangeKind::Other,
        }
    }

    /// The change type as the backend spells it.
    pub fn type_name(&self) -> &str {
        match self {
            Change::Added { .. } => "added",
            Change::Modified { .. } => "modified",
            Change::Removed { .. } => "removed",
            Change::Other { kind, .. } => kind,
        }
    }

    /// Upper-cased type used as the display label (e.g. `ADDED`).
    pub fn label(&self) -> String {
        self.type_name().to_uppercase()
    }

    /// Before/after references, present only for modified files.
    pub fn from_to(&self) -> Option<(Option<&str>, Option<&str>)> {
        match self {
            Change::Modified { from, to, .. } => Some((from.as_deref(), to.as_deref())),
            _ => None,
        }
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.label(), self.path())
    }
}

/// Counts per change kind, for summary display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeSummary {
    /// Added files.
    pub added: usize,
    /// Modified files.
    pub modified: usize,
    /// Removed files.
    pub removed: usize,
    /// Files with any other change type.
    pub other: usize,
}

impl ChangeSummary {
    /// Tally a list of changes.
    pub fn from_changes(changes: &[Change]) -> Self {
        let mut summary = Self::default();
        for change in changes {
            match change.kind() {
                ChangeKind::Added => summary.added += 1,
                ChangeKind::Modified => summary.modified += 1,
                ChangeKind::Removed => summary.removed += 1,
                ChangeKind::Other => summary.other += 1,
            }
        }
        summary
    }

    /// Total number of changes.
    pub fn total(&self) -> usize {
        self.added + self.modified + self.removed + self.other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_added_without_from_to() {
        let change: Change = serde_json::from_str(r#"{"type":"added","path":"a.txt"}"#).unwrap();
        assert_eq!(
            change,
            Change::Added {
                path: "a.txt".to_string()
            }
        );
        assert_eq!(change.label(), "ADDED");
        assert!(change.from_to().is_none());
    }

    #[test]
    fn decodes_modified_with_from_to() {
        let change: Change = serde_json::from_str(
            r#"{"type":"modified","path":"b.txt","from":"x","to":"y"}"#,
        )
        .unwrap();
        assert_eq!(change.kind(), ChangeKind::Modified);
        assert_eq!(change.from_to(), Some((Some("x"), Some("y"))));
    }

    #[test]
    fn from_to_ignored_on_other_types() {
        let change: Change =
            serde_json::from_str(r#"{"type":"removed","path":"c.txt","from":"x"}"#).unwrap();
        assert_eq!(
            change,
            Change::Removed {
                path: "c.txt".to_string()
            }
        );
    }

    #[test]
    fn unknown_type_kept_verbatim() {
        let change: Change =
            serde_json::from_str(r#"{"type":"renamed","path":"d.txt"}"#).unwrap();
        assert_eq!(change.kind(), ChangeKind::Other);
        assert_eq!(change.type_name(), "renamed");
        assert_eq!(change.label(), "RENAMED");
    }

    #[test]
    fn type_match_is_case_sensitive() {
        let change: Change =
            serde_json::from_str(r#"{"type":"Modified","path":"e.txt","from":"x","to":"y"}"#)
                .unwrap();
        assert_eq!(change.kind(), ChangeKind::Other);
        assert!(change.from_to().is_none());
    }

    #[test]
    fn serializes_back_to_wire_shape() {
        let change = Change::Added {
            path: "a.txt".to_string(),
        };
        let value = serde_json::to_value(&change).unwrap();
        assert_eq!(value, serde_json::json!({"type": "added", "path": "a.txt"}));
    }

    #[test]
    fn summary_counts_kinds() {
        let changes: Vec<Change> = serde_json::from_str(
            r#"[
                {"type":"added","path":"a"},
                {"type":"added","path":"b"},
                {"type":"modified","path":"c","from":"1","to":"2"},
                {"type":"removed","path":"d"},
                {"type":"copied","path":"e"}
            ]"#,
        )
        .unwrap();
        let summary = ChangeSummary::from_changes(&changes);
        assert_eq!(summary.added, 2);
        assert_eq!(summary.modified, 1);
        assert_eq!(summary.removed, 1);
        assert_eq!(summary.other, 1);
        assert_eq!(summary.total(), 5);
    }

    #[test]
    fn display_uses_label_and_path() {
        let change = Change::Removed {
            path: "old.rs".to_string(),
        };
        assert_eq!(change.to_string(), "REMOVED old.rs");
    }
}
