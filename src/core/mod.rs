//! Core primitives for commitdiff (no TUI dependencies).

mod change;
mod client;
mod config;
mod credentials;
mod form;
mod fuzzy;

pub use change::*;
pub use client::*;
pub use config::*;
pub use credentials::*;
pub use form::*;
pub use fuzzy::*;
