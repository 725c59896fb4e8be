//! HTTP Client for the wish backend
//!
//! Provides a typed HTTP client for listing, creating and voting on wishes.

use crate::error::{TransportError, TransportResult};
use crate::http::types::{
    ApiErrorResponse, CreateWishRequest, VoteWishRequest, WishListResponse, WishRecord,
    API_KEY_HEADER, CREATE_PATH, LIST_PATH, USER_UUID_HEADER, VOTE_PATH,
};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, instrument};
use wishkit_types::UserId;

/// HTTP Client for communicating with the wish backend
///
/// Every request is tagged with the app's API key and the device user's UUID.
///
/// # Example
///
/// ```ignore
/// let client = WishApiHttpClient::new("https://wishkit.example", "api-key", user)?;
/// let response = client.fetch_wish_list().await?;
/// ```
#[derive(Debug, Clone)]
pub struct WishApiHttpClient {
    /// HTTP client instance
    client: Client,
    /// Base URL of the backend (e.g., "https://wishkit.example")
    base_url: String,
    api_key: String,
    user_uuid: UserId,
}

impl WishApiHttpClient {
    /// Create a new client with default settings
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        user_uuid: UserId,
    ) -> TransportResult<Self> {
        Self::with_config(base_url, api_key, user_uuid, WishApiClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        user_uuid: UserId,
        config: WishApiClientConfig,
    ) -> TransportResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.max_idle_connections)
            .build()
            .map_err(|e| TransportError::Internal(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            user_uuid,
        })
    }

    /// Fetch every wish visible to this app
    ///
    /// GET /api/wish/list
    #[instrument(skip(self))]
    pub async fn fetch_wish_list(&self) -> TransportResult<WishListResponse> {
        let url = self.url(LIST_PATH);

        debug!(url = %url, "Fetching wish list");

        let response = self.authorize(self.client.get(&url)).send().await?;
        let list: WishListResponse = decode(response).await?;

        debug!(count = list.list.len(), "Wish list received");
        Ok(list)
    }

    /// Create a new wish owned by this user
    ///
    /// POST /api/wish/create
    #[instrument(skip(self, request), fields(title_len = request.title.len()))]
    pub async fn create_wish(&self, request: &CreateWishRequest) -> TransportResult<WishRecord> {
        let url = self.url(CREATE_PATH);

        debug!(url = %url, "Sending create-wish request");

        let response = self
            .authorize(self.client.post(&url))
            .json(request)
            .send()
            .await?;

        decode(response).await
    }

    /// Upvote a wish
    ///
    /// POST /api/wish/vote
    #[instrument(skip(self, request), fields(wish_id = %request.wish_id))]
    pub async fn vote_wish(&self, request: &VoteWishRequest) -> TransportResult<WishRecord> {
        let url = self.url(VOTE_PATH);

        debug!(url = %url, "Sending vote request");

        let response = self
            .authorize(self.client.post(&url))
            .json(request)
            .send()
            .await?;

        decode(response).await
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// User the requests are sent on behalf of
    pub fn user_uuid(&self) -> &UserId {
        &self.user_uuid
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header(API_KEY_HEADER, &self.api_key)
            .header(USER_UUID_HEADER, self.user_uuid.to_string())
    }
}

/// Turn a backend response into `T`, or into `TransportError::Api` on non-2xx
async fn decode<T: DeserializeOwned>(response: Response) -> TransportResult<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let reason = serde_json::from_str::<ApiErrorResponse>(&body)
            .map(|e| e.reason)
            .unwrap_or(body);
        error!(status = %status, reason = %reason, "Backend returned error");
        return Err(TransportError::Api {
            status: status.as_u16(),
            reason,
        });
    }

    // body read failures keep their timeout/connect classification
    Ok(response.json().await?)
}

/// Configuration for WishApiHttpClient
#[derive(Debug, Clone)]
pub struct WishApiClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Maximum idle connections per host
    pub max_idle_connections: usize,
}

impl Default for WishApiClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
            max_idle_connections: 4,
        }
    }
}

impl WishApiClientConfig {
    /// Create config with custom timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Create config with custom connect timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}
