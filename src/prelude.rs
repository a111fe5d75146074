//! Common re-exports for convenient importing.
//!
//! # Example
//!
//! ```rust,ignore
//! use commitdiff::prelude::*;
//! ```

pub use crate::core::{
    compare_commits, Change, ChangeKind, CompareBackend, CompareClient, CompareError, CompareForm,
    CredentialProvider, EnvCredentials, FormField, StaticCredentials, TokenStore,
};
