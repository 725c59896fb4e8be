//! Identity store implementations.
//!
//! This module provides:
//! - `FileIdentityStore` persisting the UUID as a one-field JSON document
//! - `InMemIdentityStore` for tests or ephemeral sessions
//! - `IdentityStore` dispatching between the two

use crate::error::{IdentityError, IdentityResult};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;
use wishkit_types::UserId;

/// On-disk representation of the identity file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredIdentity {
    pub user_uuid: UserId,
}

/// Unified identity store supporting different storage backends.
#[derive(Debug)]
pub enum IdentityStore {
    File(FileIdentityStore),
    InMem(InMemIdentityStore),
}

impl IdentityStore {
    /// Create a file-backed store at `path`.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        IdentityStore::File(FileIdentityStore::new(path))
    }

    /// Create an empty in-memory store.
    pub fn in_memory() -> Self {
        IdentityStore::InMem(InMemIdentityStore::default())
    }

    /// Load the persisted identity, `None` if nothing was stored yet.
    pub fn load(&self) -> IdentityResult<Option<UserId>> {
        match self {
            IdentityStore::File(store) => store.load(),
            IdentityStore::InMem(store) => Ok(store.load()),
        }
    }

    /// Persist `user`, replacing whatever was stored.
    pub fn save(&self, user: UserId) -> IdentityResult<()> {
        match self {
            IdentityStore::File(store) => store.save(user),
            IdentityStore::InMem(store) => {
                store.save(user);
                Ok(())
            }
        }
    }
}

/// File-backed identity store.
#[derive(Debug, Clone)]
pub struct FileIdentityStore {
    path: PathBuf,
}

impl FileIdentityStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the identity file.
    ///
    /// A missing file means no identity yet. A present but unreadable file is
    /// an error, never a reason to generate a new identity.
    pub fn load(&self) -> IdentityResult<Option<UserId>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let reader = BufReader::new(fs::File::open(&self.path)?);
        let stored: StoredIdentity =
            serde_json::from_reader(reader).map_err(|e| IdentityError::Corrupted {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        debug!(path = %self.path.display(), "Loaded user identity");
        Ok(Some(stored.user_uuid))
    }

    /// Write the identity file, creating parent directories as needed.
    pub fn save(&self, user: UserId) -> IdentityResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(&StoredIdentity { user_uuid: user })
            .map_err(|e| IdentityError::Serialization(e.to_string()))?;
        fs::write(&self.path, content)?;

        debug!(path = %self.path.display(), "Saved user identity");
        Ok(())
    }
}

/// In-memory identity store for testing or ephemeral use.
#[derive(Debug, Default)]
pub struct InMemIdentityStore {
    slot: Mutex<Option<UserId>>,
}

impl InMemIdentityStore {
    /// Store pre-seeded with `user`.
    pub fn with_user(user: UserId) -> Self {
        Self {
            slot: Mutex::new(Some(user)),
        }
    }

    pub fn load(&self) -> Option<UserId> {
        *self.slot.lock()
    }

    pub fn save(&self, user: UserId) {
        *self.slot.lock() = Some(user);
    }
}
