//! HTTP wire types for the wish API
//!
//! Request and response bodies are the shared types from `wishkit-types`;
//! this module only adds what is specific to HTTP: header names, routes and
//! the error body the backend returns on non-2xx responses.

use serde::{Deserialize, Serialize};

pub use wishkit_types::{CreateWishRequest, VoteWishRequest, WishListResponse, WishRecord};

/// Header carrying the app's WishKit API key
pub const API_KEY_HEADER: &str = "x-wishkit-api-key";

/// Header carrying the device user's UUID
pub const USER_UUID_HEADER: &str = "x-wishkit-uuid";

pub const LIST_PATH: &str = "/api/wish/list";
pub const CREATE_PATH: &str = "/api/wish/create";
pub const VOTE_PATH: &str = "/api/wish/vote";

/// Error body returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Human-readable reason, shown to the user as-is
    pub reason: String,
}

impl ApiErrorResponse {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
