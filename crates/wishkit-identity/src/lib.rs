//! Device user identity for the WishKit client.
//!
//! This crate provides:
//! - `IdentityStore` for persisting the user UUID (file-based and in-memory)
//! - `IdentityProvider` for lazily generating and caching the current user
//!
//! The identity is generated once per installation and never changes
//! afterwards. It decides which pending wishes the current user owns.

pub mod error;
pub mod provider;
pub mod store;

pub use error::{IdentityError, IdentityResult};
pub use provider::IdentityProvider;
pub use store::{FileIdentityStore, IdentityStore, InMemIdentityStore, StoredIdentity};
