//! Wish records
//!
//! A wish is a feature request submitted by a user of the host app. The
//! backend owns the record; the client only reads it, classifies it for
//! display, and votes on it.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::user::{UserId, VotingUser};

pub type WishId = Uuid;

/// Review state of a wish, as reported by the backend
///
/// States the backend adds later are kept as `Unknown` instead of failing the
/// whole list; they are never displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WishState {
    /// Submitted, waiting for review by the app developer
    Pending,
    /// Accepted and open for voting
    Approved,
    /// Shipped
    Implemented,
    /// Declined by the app developer
    Rejected,
    Unknown(String),
}

impl WishState {
    pub fn as_str(&self) -> &str {
        match self {
            WishState::Pending => "pending",
            WishState::Approved => "approved",
            WishState::Implemented => "implemented",
            WishState::Rejected => "rejected",
            WishState::Unknown(raw) => raw,
        }
    }
}

impl From<String> for WishState {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "pending" => WishState::Pending,
            "approved" => WishState::Approved,
            "implemented" => WishState::Implemented,
            "rejected" => WishState::Rejected,
            _ => WishState::Unknown(raw),
        }
    }
}

impl From<WishState> for String {
    fn from(state: WishState) -> Self {
        state.as_str().to_string()
    }
}

impl fmt::Display for WishState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single wish as delivered by `GET /api/wish/list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishRecord {
    pub id: WishId,
    /// Owner of the wish
    #[serde(rename = "userUUID")]
    pub user_uuid: UserId,
    pub title: String,
    pub description: String,
    pub state: WishState,
    #[serde(default)]
    pub voting_users: Vec<VotingUser>,
    /// Creation timestamp (milliseconds)
    #[serde(default)]
    pub created_at: u64,
}

impl WishRecord {
    /// Create a pending wish owned by `owner` with no votes
    pub fn new(owner: UserId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_uuid: owner,
            title: title.into(),
            description: description.into(),
            state: WishState::Pending,
            voting_users: Vec::new(),
            created_at: now_millis(),
        }
    }

    pub fn with_id(mut self, id: WishId) -> Self {
        self.id = id;
        self
    }

    pub fn with_state(mut self, state: WishState) -> Self {
        self.state = state;
        self
    }

    pub fn with_voters(mut self, voters: impl IntoIterator<Item = UserId>) -> Self {
        self.voting_users = voters.into_iter().map(VotingUser::new).collect();
        self
    }

    pub fn vote_count(&self) -> usize {
        self.voting_users.len()
    }

    pub fn has_voted(&self, user: &UserId) -> bool {
        self.voting_users.iter().any(|v| &v.uuid == user)
    }

    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.user_uuid == user
    }
}

/// Current unix time in milliseconds
pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
