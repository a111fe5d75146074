//! Access-token lookup for the compare endpoint.
//!
//! The request handler never reads ambient storage directly; it is handed a
//! [`CredentialProvider`] and asks it for the token on every request.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::core::config_dir;

/// Key under which the access token is stored.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

/// Environment variable consulted before the token store.
pub const TOKEN_ENV: &str = "COMMITDIFF_TOKEN";

/// Source of the bearer token.
pub trait CredentialProvider: Send {
    /// Current access token, if one is available.
    fn access_token(&self) -> Option<String>;
}

/// A fixed token (or none). Useful for tests and one-shot CLI runs.
#[derive(Debug, Default, Clone)]
pub struct StaticCredentials {
    token: Option<String>,
}

impl StaticCredentials {
    /// Provider that always returns `token`.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// Provider with no token.
    pub fn none() -> Self {
        Self::default()
    }
}

impl CredentialProvider for StaticCredentials {
    fn access_token(&self) -> Option<String> {
        non_empty(self.token.clone())
    }
}

/// Reads the token from [`TOKEN_ENV`] on each call.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvCredentials;

impl CredentialProvider for EnvCredentials {
    fn access_token(&self) -> Option<String> {
        non_empty(std::env::var(TOKEN_ENV).ok())
    }
}

/// Tries each provider in order and returns the first token found.
#[derive(Default)]
pub struct ChainedCredentials {
    providers: Vec<Box<dyn CredentialProvider>>,
}

impl ChainedCredentials {
    /// Empty chain (never yields a token).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a provider to the chain.
    pub fn with(mut self, provider: impl CredentialProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }
}

impl CredentialProvider for ChainedCredentials {
    fn access_token(&self) -> Option<String> {
        self.providers.iter().find_map(|p| p.access_token())
    }
}

/// File-backed key/value token store (`credentials.json`).
///
/// Reads hit the file every time so a token written by `commitdiff auth set`
/// in another terminal is picked up without restarting the UI.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Store at the default location in the config directory.
    pub fn open_default() -> Self {
        Self::with_path(config_dir().join("credentials.json"))
    }

    /// Store at a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a value by key.
    #[must_use = "this returns a Result that should be checked"]
    pub fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    /// Set a value and persist.
    #[must_use = "this returns a Result that should be checked"]
    pub fn set(&self, key: &str, value: &str) -> io::Result<()> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    /// Remove a value and persist. Returns whether the key existed.
    #[must_use = "this returns a Result that should be checked"]
    pub fn remove(&self, key: &str) -> io::Result<bool> {
        let mut entries = self.read_all()?;
        let existed = entries.remove(key).is_some();
        if existed {
            self.write_all(&entries)?;
        }
        Ok(existed)
    }

    fn read_all(&self) -> io::Result<BTreeMap<String, String>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e),
        };

        serde_json::from_str(&content).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("invalid {}: {}", self.path.display(), e),
            )
        })
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Atomic write: temp file + rename
        let temp_path = self.path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(entries)?;
        let result = write_private(&temp_path, content.as_bytes())
            .and_then(|_| std::fs::rename(&temp_path, &self.path));
        if result.is_err() {
            let _ = std::fs::remove_file(&temp_path);
        }
        result
    }
}

impl CredentialProvider for TokenStore {
    fn access_token(&self) -> Option<String> {
        match self.get(ACCESS_TOKEN_KEY) {
            Ok(token) => non_empty(token),
            Err(e) => {
                log::warn!("Failed to read token store: {}", e);
                None
            }
        }
    }
}

/// Write `content` to a fresh file that only the owner can read.
fn write_private(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    // A leftover temp file keeps its old mode; tighten it before writing.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(content)?;
    file.sync_all()
}

fn non_empty(token: Option<String>) -> Option<String> {
    token.filter(|t| !t.is_empty())
}
