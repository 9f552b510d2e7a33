//! Session token storage.
//!
//! The session is a single opaque bearer token. Its presence is the only
//! authentication signal the client uses; validity is decided by the server
//! on each request.
//!
//! `FileSessionStore` persists the token in `<base>/session.json` with
//! restricted permissions (0600). Tokens are never logged.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// Holder of the current credential token.
///
/// Reads and writes are treated as infallible by callers. Implementations
/// that touch durable storage log failures instead of returning them.
pub trait SessionStore: Send + Sync {
    /// Returns the current token, if any.
    fn token(&self) -> Option<String>;

    /// Replaces the current token.
    fn set_token(&self, token: &str);

    /// Removes the current token.
    fn clear(&self);

    /// Returns true when a token is present (presence, not validity).
    fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

/// Shared handle to a session store.
pub type SharedSession = Arc<dyn SessionStore>;

/// In-process store with no persistence.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: RwLock<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    fn set_token(&self, token: &str) {
        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token.to_string());
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.token.write() {
            *slot = None;
        }
    }
}

/// On-disk representation of the session file.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

/// Durable store backed by a JSON file.
///
/// The token is read once at open and cached; every change is written
/// through to disk.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    token: RwLock<Option<String>>,
}

impl FileSessionStore {
    /// Opens the store at the default session path.
    ///
    /// # Errors
    /// Returns an error if an existing session file cannot be read or parsed.
    pub fn open_default() -> Result<Self> {
        Self::open(paths::session_path())
    }

    /// Opens the store at `path`. A missing file means no session.
    ///
    /// # Errors
    /// Returns an error if an existing session file cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = load_session_file(&path)?;
        Ok(Self {
            path,
            token: RwLock::new(file.token.filter(|t| !t.is_empty())),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, token: Option<&str>) {
        let file = SessionFile {
            token: token.map(str::to_string),
        };
        if let Err(e) = save_session_file(&self.path, &file) {
            tracing::warn!(path = %self.path.display(), error = %format!("{e:#}"), "failed to persist session");
        }
    }
}

impl SessionStore for FileSessionStore {
    fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    fn set_token(&self, token: &str) {
        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token.to_string());
        }
        self.persist(Some(token));
        tracing::debug!("session token stored");
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.token.write() {
            *slot = None;
        }
        if self.path.exists()
            && let Err(e) = fs::remove_file(&self.path)
        {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to remove session file");
        }
        tracing::debug!("session cleared");
    }
}

fn load_session_file(path: &Path) -> Result<SessionFile> {
    if !path.exists() {
        return Ok(SessionFile::default());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read session from {}", path.display()))?;
    if contents.trim().is_empty() {
        return Ok(SessionFile::default());
    }

    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse session from {}", path.display()))
}

/// Writes the session file with restricted permissions (0600).
fn save_session_file(path: &Path, file: &SessionFile) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let contents = serde_json::to_string_pretty(file).context("Failed to serialize session")?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        let mut out = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)
            .with_context(|| format!("Failed to open {} for writing", path.display()))?;
        out.write_all(contents.as_bytes())
            .with_context(|| format!("Failed to write to {}", path.display()))?;
    }

    #[cfg(not(unix))]
    {
        fs::write(path, contents)
            .with_context(|| format!("Failed to write to {}", path.display()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_memory_store_set_get_clear() {
        let store = MemorySessionStore::new();
        assert!(!store.is_authenticated());

        store.set_token("abc");
        assert_eq!(store.token().as_deref(), Some("abc"));
        assert!(store.is_authenticated());

        store.set_token("def");
        assert_eq!(store.token().as_deref(), Some("def"));

        store.clear();
        assert_eq!(store.token(), None);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = FileSessionStore::open(&path).unwrap();
        assert_eq!(store.token(), None);
        store.set_token("abc");

        let reopened = FileSessionStore::open(&path).unwrap();
        assert_eq!(reopened.token().as_deref(), Some("abc"));

        reopened.clear();
        assert!(!path.exists());
        let after_clear = FileSessionStore::open(&path).unwrap();
        assert!(!after_clear.is_authenticated());
    }

    #[test]
    fn test_file_store_uses_token_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");

        FileSessionStore::open(&path).unwrap().set_token("abc");

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["token"], "abc");
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_restricts_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        FileSessionStore::open(&path).unwrap().set_token("abc");

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_empty_file_means_no_session() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "").unwrap();

        let store = FileSessionStore::open(&path).unwrap();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        assert!(FileSessionStore::open(&path).is_err());
    }
}
