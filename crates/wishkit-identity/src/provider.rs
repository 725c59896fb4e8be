//! Lazily initialized current user.

use crate::error::IdentityResult;
use crate::store::IdentityStore;
use parking_lot::Mutex;
use std::sync::OnceLock;
use tracing::info;
use wishkit_types::UserId;

static GLOBAL: OnceLock<IdentityProvider> = OnceLock::new();

/// Resolves the current user once and hands out the same id afterwards.
///
/// The first call loads the id from the store, generating and persisting a
/// new one if the store is empty. Later calls never touch the store again.
#[derive(Debug)]
pub struct IdentityProvider {
    store: IdentityStore,
    current: Mutex<Option<UserId>>,
}

impl IdentityProvider {
    pub fn new(store: IdentityStore) -> Self {
        Self {
            store,
            current: Mutex::new(None),
        }
    }

    /// Process-wide provider, created by `init` on first use.
    ///
    /// Later calls return the provider from the first call and ignore `init`.
    pub fn global(init: impl FnOnce() -> IdentityProvider) -> &'static IdentityProvider {
        GLOBAL.get_or_init(init)
    }

    /// The current user's id, generated and persisted on first call.
    pub fn current_user(&self) -> IdentityResult<UserId> {
        let mut current = self.current.lock();
        if let Some(user) = *current {
            return Ok(user);
        }

        let user = match self.store.load()? {
            Some(user) => user,
            None => {
                let user = UserId::generate();
                self.store.save(user)?;
                info!(user = %user, "Generated new user identity");
                user
            }
        };

        *current = Some(user);
        Ok(user)
    }

    /// The cached id, without touching the store.
    pub fn cached_user(&self) -> Option<UserId> {
        *self.current.lock()
    }

    pub fn store(&self) -> &IdentityStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemIdentityStore;

    #[test]
    fn test_generates_once_and_persists() {
        let provider = IdentityProvider::new(IdentityStore::in_memory());
        assert_eq!(provider.cached_user(), None);

        let first = provider.current_user().unwrap();
        let second = provider.current_user().unwrap();

        assert_eq!(first, second);
        assert_eq!(provider.cached_user(), Some(first));
        assert_eq!(provider.store().load().unwrap(), Some(first));
    }

    #[test]
    fn test_existing_identity_is_reused() {
        let user = UserId::generate();
        let provider =
            IdentityProvider::new(IdentityStore::InMem(InMemIdentityStore::with_user(user)));

        assert_eq!(provider.current_user().unwrap(), user);
    }

    #[test]
    fn test_cached_user_survives_store_changes() {
        let provider = IdentityProvider::new(IdentityStore::in_memory());
        let user = provider.current_user().unwrap();

        provider.store().save(UserId::generate()).unwrap();

        assert_eq!(provider.current_user().unwrap(), user);
    }
}
