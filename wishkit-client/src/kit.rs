//! Entry point wiring config, identity and the HTTP client together

use anyhow::{Context, Result};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::info;
use wishkit_identity::{IdentityProvider, IdentityStore};
use wishkit_transport::http::WishApiHttpClient;
use wishkit_types::UserId;

use crate::compose::SharedDraft;
use crate::config::WishKitConfig;
use crate::draft::WishDraftModel;
use crate::error::WishKitError;
use crate::wishlist::WishListModel;

/// A configured WishKit instance
///
/// # Example
///
/// ```ignore
/// let kit = WishKit::from_config(WishKitConfig::load(WishKitConfig::default_path()?)?)?;
/// let wishlist = kit.wishlist_model();
/// wishlist.refresh().await?;
/// ```
pub struct WishKit {
    config: WishKitConfig,
    user: UserId,
    client: Arc<WishApiHttpClient>,
}

impl WishKit {
    /// Resolve the device identity from the configured file and build the client
    ///
    /// An unreadable or corrupted identity file fails with
    /// [`WishKitError::Identity`] as the underlying error.
    pub fn from_config(config: WishKitConfig) -> Result<Self> {
        let identity_path = config.identity_path()?;
        let provider = IdentityProvider::new(IdentityStore::file(&identity_path));
        let user = provider
            .current_user()
            .map_err(WishKitError::from)
            .with_context(|| format!("Failed to resolve identity at {}", identity_path.display()))?;

        Self::with_user(config, user)
    }

    /// Build with an already known user, skipping the identity store
    pub fn with_user(config: WishKitConfig, user: UserId) -> Result<Self> {
        let client = WishApiHttpClient::with_config(
            config.api_base_url.clone(),
            config.api_key.clone(),
            user,
            config.http_client_config(),
        )
        .context("Failed to build wish API client")?;

        info!(user = %user, base_url = %client.base_url(), "WishKit ready");

        Ok(Self {
            config,
            user,
            client: Arc::new(client),
        })
    }

    pub fn config(&self) -> &WishKitConfig {
        &self.config
    }

    pub fn current_user(&self) -> UserId {
        self.user
    }

    pub fn client(&self) -> Arc<WishApiHttpClient> {
        self.client.clone()
    }

    /// A fresh wishlist model; call `refresh()` to load it
    pub fn wishlist_model(&self) -> WishListModel {
        WishListModel::new(self.user, self.client.clone())
    }

    /// An empty draft using the configured limits
    pub fn new_draft(&self) -> SharedDraft {
        Arc::new(Mutex::new(WishDraftModel::new(self.config.draft_limits())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wishkit_identity::IdentityError;

    #[test]
    fn test_identity_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let config = WishKitConfig {
            identity_path: Some(dir.path().join("identity.json")),
            ..WishKitConfig::default()
        };

        let first = WishKit::from_config(config.clone()).unwrap();
        let second = WishKit::from_config(config).unwrap();

        assert_eq!(first.current_user(), second.current_user());
        assert_eq!(first.wishlist_model().current_user(), &first.current_user());
    }

    #[test]
    fn test_corrupted_identity_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("identity.json");
        std::fs::write(&path, "not json").unwrap();

        let config = WishKitConfig {
            identity_path: Some(path),
            ..WishKitConfig::default()
        };
        let err = match WishKit::from_config(config) {
            Ok(_) => panic!("corrupted identity file was accepted"),
            Err(e) => e,
        };

        assert!(matches!(
            err.downcast_ref::<WishKitError>(),
            Some(WishKitError::Identity(IdentityError::Corrupted { .. }))
        ));
    }

    #[test]
    fn test_new_draft_uses_configured_limits() {
        let config = WishKitConfig {
            title_limit: 10,
            ..WishKitConfig::default()
        };
        let kit = WishKit::with_user(config, UserId::generate()).unwrap();

        let draft = kit.new_draft();
        assert_eq!(draft.lock().counter_label(crate::draft::DraftField::Title), "0/10");
    }
}
