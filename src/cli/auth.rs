//! `commitdiff auth`: manage the stored access token.

use std::io::Write;
use std::process::ExitCode;

use clap::Subcommand;

use crate::core::{TokenStore, ACCESS_TOKEN_KEY, TOKEN_ENV};

/// Token management actions.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    /// Store an access token
    Set {
        /// The bearer token
        token: String,
    },
    /// Remove the stored access token
    Clear,
    /// Show where the token comes from (never prints it)
    Status,
}

/// Run an auth subcommand against `store`, writing messages to `out`.
/// Returns ExitCode for the process.
pub fn run_auth_command(
    store: &TokenStore,
    action: &AuthAction,
    out: &mut impl Write,
) -> ExitCode {
    match action {
        AuthAction::Set { token } => {
            let token = token.trim();
            if token.is_empty() {
                eprintln!("Refusing to store an empty token");
                return ExitCode::from(1);
            }
            if let Err(e) = store.set(ACCESS_TOKEN_KEY, token) {
                eprintln!("Failed to save token: {}", e);
                return ExitCode::from(1);
            }
            let _ = writeln!(out, "Token saved to {}", store.path().display());
        }
        AuthAction::Clear => match store.remove(ACCESS_TOKEN_KEY) {
            Ok(true) => {
                let _ = writeln!(out, "Token removed");
            }
            Ok(false) => {
                let _ = writeln!(out, "No token stored");
            }
            Err(e) => {
                eprintln!("Failed to remove token: {}", e);
                return ExitCode::from(1);
            }
        },
        AuthAction::Status => {
            let env_set = std::env::var(TOKEN_ENV).is_ok_and(|t| !t.is_empty());
            let stored = match store.get(ACCESS_TOKEN_KEY) {
                Ok(t) => t.is_some_and(|t| !t.is_empty()),
                Err(e) => {
                    eprintln!("Failed to read token store: {}", e);
                    return ExitCode::from(1);
                }
            };
            let _ = match (env_set, stored) {
                (true, _) => writeln!(out, "Access token: set (from ${})", TOKEN_ENV),
                (false, true) => writeln!(
                    out,
                    "Access token: set (stored in {})",
                    store.path().display()
                ),
                (false, false) => writeln!(out, "Access token: not set"),
            };
        }
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(store: &TokenStore, action: AuthAction) -> String {
        let mut out = Vec::new();
        let _ = run_auth_command(store, &action, &mut out);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn set_then_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::with_path(dir.path().join("credentials.json"));

        let msg = run(
            &store,
            AuthAction::Set {
                token: " secret ".to_string(),
            },
        );
        assert!(msg.starts_with("Token saved"));
        assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("secret"));

        let msg = run(&store, AuthAction::Clear);
        assert_eq!(msg, "Token removed\n");
        let msg = run(&store, AuthAction::Clear);
        assert_eq!(msg, "No token stored\n");
    }

    #[test]
    fn empty_token_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::with_path(dir.path().join("credentials.json"));
        let msg = run(
            &store,
            AuthAction::Set {
                token: "  ".to_string(),
            },
        );
        assert!(msg.is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn status_never_prints_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::with_path(dir.path().join("credentials.json"));
        store.set(ACCESS_TOKEN_KEY, "hunter2").unwrap();
        let msg = run(&store, AuthAction::Status);
        assert!(msg.starts_with("Access token: set"));
        assert!(!msg.contains("hunter2"));
    }
}
