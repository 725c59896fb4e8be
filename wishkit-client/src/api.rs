//! Collaborators the models talk to
//!
//! The models never see HTTP. They call these traits; the HTTP client
//! implements them, tests substitute fakes.

use async_trait::async_trait;
use wishkit_transport::http::WishApiHttpClient;
use wishkit_types::{CreateWishRequest, VoteWishRequest, WishListResponse, WishRecord};

use crate::error::WishKitResult;

/// Fetches the full wish list
#[async_trait]
pub trait WishFetcher: Send + Sync {
    async fn fetch_wish_list(&self) -> WishKitResult<WishListResponse>;
}

/// Creates a wish on behalf of the current user
#[async_trait]
pub trait WishCreator: Send + Sync {
    async fn create_wish(&self, request: CreateWishRequest) -> WishKitResult<WishRecord>;
}

/// Upvotes a wish on behalf of the current user
#[async_trait]
pub trait WishVoter: Send + Sync {
    /// Returns the wish as updated by the backend
    async fn vote_wish(&self, request: VoteWishRequest) -> WishKitResult<WishRecord>;
}

#[async_trait]
impl WishFetcher for WishApiHttpClient {
    async fn fetch_wish_list(&self) -> WishKitResult<WishListResponse> {
        Ok(WishApiHttpClient::fetch_wish_list(self).await?)
    }
}

#[async_trait]
impl WishCreator for WishApiHttpClient {
    async fn create_wish(&self, request: CreateWishRequest) -> WishKitResult<WishRecord> {
        Ok(WishApiHttpClient::create_wish(self, &request).await?)
    }
}

#[async_trait]
impl WishVoter for WishApiHttpClient {
    async fn vote_wish(&self, request: VoteWishRequest) -> WishKitResult<WishRecord> {
        Ok(WishApiHttpClient::vote_wish(self, &request).await?)
    }
}
