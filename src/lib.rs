//! commitdiff - compare two commits of a hosted repository from the terminal.
//!
//! Collects a workspace, repository slug and two commit identifiers, asks a
//! compare-commits backend for the files that changed between them, and shows
//! the result as a navigable list.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use commitdiff::prelude::*;
//!
//! let client = CompareClient::new("http://localhost:3000")?;
//! let form = CompareForm::new("acme", "widgets", "abc123", "def456");
//! let changes = compare_commits(&client, &EnvCredentials, &form)?;
//! ```

#![deny(missing_docs)]

pub mod cli;
pub mod core;
pub mod metrics;
pub mod prelude;
pub mod theme;
pub mod ui;
