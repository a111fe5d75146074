//! Non-interactive subcommands.

mod auth;
mod compare;

pub use auth::{run_auth_command, AuthAction};
pub use compare::{run_compare_command, write_changes, OutputFormat};
