//! # Access Tokens
//!
//! The bearer token the API issues at login, and the places it can live.
//!
//! ## Token Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Token Lifecycle                                 │
//! │                                                                         │
//! │  login (out of band) ──► TokenProvider::set_token(..)                  │
//! │                                │                                        │
//! │                                ▼                                        │
//! │  CartStore / AdminConsole ──► token() ── None ──► NotAuthenticated     │
//! │                                │                  (no request sent)     │
//! │                                └── Some ──► Authorization: Bearer ..   │
//! │                                                                         │
//! │  logout ──► TokenProvider::clear() + CartStore::reset()                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no refresh flow. An expired token surfaces as an HTTP 401.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, info};

use crate::error::{ClientError, ClientResult};

// =============================================================================
// Access Token
// =============================================================================

/// Opaque bearer credential. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a raw token, trimming surrounding whitespace.
    /// Returns `None` for a blank string.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(AccessToken(trimmed.to_string()))
        }
    }

    /// The raw token, for the `Authorization` header only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

// =============================================================================
// Token Provider
// =============================================================================

/// Source of the current session token.
///
/// Reads are synchronous and cheap; every authenticated operation asks
/// again, so a logout elsewhere takes effect on the next call.
pub trait TokenProvider: Send + Sync {
    /// The current token, if signed in.
    fn token(&self) -> Option<AccessToken>;

    /// Stores a new token.
    fn set_token(&self, token: AccessToken) -> ClientResult<()>;

    /// Forgets the token.
    fn clear(&self) -> ClientResult<()>;

    fn is_signed_in(&self) -> bool {
        self.token().is_some()
    }
}

fn read_slot(slot: &RwLock<Option<AccessToken>>) -> Option<AccessToken> {
    match slot.read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

fn write_slot(slot: &RwLock<Option<AccessToken>>, value: Option<AccessToken>) {
    match slot.write() {
        Ok(mut guard) => *guard = value,
        Err(poisoned) => *poisoned.into_inner() = value,
    }
}

/// Token held only for the life of the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: RwLock<Option<AccessToken>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: AccessToken) -> Self {
        MemoryTokenStore {
            slot: RwLock::new(Some(token)),
        }
    }
}

impl TokenProvider for MemoryTokenStore {
    fn token(&self) -> Option<AccessToken> {
        read_slot(&self.slot)
    }

    fn set_token(&self, token: AccessToken) -> ClientResult<()> {
        write_slot(&self.slot, Some(token));
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        write_slot(&self.slot, None);
        Ok(())
    }
}

/// A fixed token supplied by the caller (e.g. from an environment variable).
/// It cannot be replaced or cleared.
#[derive(Debug, Clone)]
pub struct StaticToken(AccessToken);

impl StaticToken {
    pub fn new(token: AccessToken) -> Self {
        StaticToken(token)
    }
}

impl TokenProvider for StaticToken {
    fn token(&self) -> Option<AccessToken> {
        Some(self.0.clone())
    }

    fn set_token(&self, _token: AccessToken) -> ClientResult<()> {
        Err(ClientError::TokenStore("static token cannot be replaced".into()))
    }

    fn clear(&self) -> ClientResult<()> {
        Err(ClientError::TokenStore("static token cannot be cleared".into()))
    }
}

/// Token persisted to a single file so it survives restarts.
///
/// The file holds the raw token and nothing else. It is read once at open
/// and cached; writes go to both the cache and disk.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    slot: RwLock<Option<AccessToken>>,
}

impl FileTokenStore {
    /// Opens the store, reading an existing token if the file is present.
    pub fn open(path: impl Into<PathBuf>) -> ClientResult<Self> {
        let path = path.into();
        let token = match std::fs::read_to_string(&path) {
            Ok(contents) => AccessToken::new(contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                return Err(ClientError::TokenStore(format!("{}: {}", path.display(), e)));
            }
        };
        debug!(?path, signed_in = token.is_some(), "Opened token file");

        Ok(FileTokenStore {
            path,
            slot: RwLock::new(token),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_file(&self, token: &AccessToken) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token.expose())?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }
}

impl TokenProvider for FileTokenStore {
    fn token(&self) -> Option<AccessToken> {
        read_slot(&self.slot)
    }

    fn set_token(&self, token: AccessToken) -> ClientResult<()> {
        self.write_file(&token)
            .map_err(|e| ClientError::TokenStore(format!("{}: {}", self.path.display(), e)))?;
        write_slot(&self.slot, Some(token));
        info!(path = ?self.path, "Session token saved");
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(ClientError::TokenStore(format!("{}: {}", self.path.display(), e)));
            }
        }
        write_slot(&self.slot, None);
        info!(path = ?self.path, "Session token cleared");
        Ok(())
    }
}
