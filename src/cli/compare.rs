//! `commitdiff compare`: one request, printed to stdout.

use std::io::{self, Write};
use std::process::ExitCode;

use serde::Serialize;

use crate::core::{compare_commits, Change, CompareBackend, CompareForm, CredentialProvider};

/// How `compare` prints its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One `LABEL path` line per change, with indented From/To lines.
    #[default]
    Plain,
    /// The `{ "changes": [...] }` body as pretty JSON.
    Json,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    changes: &'a [Change],
}

/// Write `changes` in the given format.
pub fn write_changes(
    out: &mut impl Write,
    changes: &[Change],
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &JsonOutput { changes })?;
            writeln!(out)
        }
        OutputFormat::Plain => {
            if changes.is_empty() {
                return writeln!(out, "No changes");
            }
            for change in changes {
                writeln!(out, "{} {}", change.label(), change.path())?;
                if let Some((from, to)) = change.from_to() {
                    writeln!(out, "  From: {}", from.unwrap_or("(none)"))?;
                    writeln!(out, "  To: {}", to.unwrap_or("(none)"))?;
                }
            }
            Ok(())
        }
    }
}

/// Run one comparison and print it.
/// Returns ExitCode for the process.
pub fn run_compare_command(
    backend: &dyn CompareBackend,
    credentials: &dyn CredentialProvider,
    form: &CompareForm,
    format: OutputFormat,
) -> ExitCode {
    let changes = match compare_commits(backend, credentials, form) {
        Ok(changes) => changes,
        Err(e) => {
            log::warn!("compare failed: {}", e);
            eprintln!("{}", e.user_message());
            return ExitCode::from(1);
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = write_changes(&mut out, &changes, format) {
        eprintln!("Failed to write output: {}", e);
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}
