//! Error types for identity storage.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or persisting the user identity.
#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Identity file {path} is corrupted: {reason}")]
    Corrupted { path: PathBuf, reason: String },
}

pub type IdentityResult<T> = Result<T, IdentityError>;
