//! Requests the client sends to the wish backend
//!
//! These are plain values: once built they are never mutated. The draft model
//! builds a [`SubmitRequest`], the list model builds [`VoteWishRequest`]s.

use serde::{Deserialize, Serialize};

use crate::wish::{WishId, WishRecord};

/// Body of `POST /api/wish/create`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateWishRequest {
    pub title: String,
    pub description: String,
}

impl CreateWishRequest {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Body of `POST /api/wish/vote`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteWishRequest {
    pub wish_id: WishId,
}

impl VoteWishRequest {
    pub fn new(wish_id: WishId) -> Self {
        Self { wish_id }
    }
}

/// Request produced by a validated draft
///
/// Only creation exists today. Editing an existing wish would add a variant
/// carrying the wish id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRequest {
    Create(CreateWishRequest),
}

/// Body of `GET /api/wish/list`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishListResponse {
    pub list: Vec<WishRecord>,
}

impl WishListResponse {
    pub fn new(list: Vec<WishRecord>) -> Self {
        Self { list }
    }
}
