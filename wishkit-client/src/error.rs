//! Client error types
//!
//! Every collaborator failure is converted into a [`WishKitError`] at the
//! model boundary. Nothing in this crate panics on a failed request.

use thiserror::Error;
use wishkit_identity::IdentityError;
use wishkit_transport::TransportError;
use wishkit_types::WishId;

/// Local validation failure of a wish draft
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title must not be empty")]
    EmptyTitle,

    #[error("Title has {count} characters, limit is {limit}")]
    TitleTooLong { count: usize, limit: usize },

    #[error("Description must not be empty")]
    EmptyDescription,

    #[error("Description has {count} characters, limit is {limit}")]
    DescriptionTooLong { count: usize, limit: usize },
}

/// Vote refused locally, before any request was sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VoteRejection {
    #[error("You can only vote once")]
    AlreadyVoted,

    #[error("This wish is already implemented")]
    AlreadyImplemented,
}

/// Client error types
#[derive(Debug, Error)]
pub enum WishKitError {
    /// Backend unreachable or no answer in time
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with a failure
    #[error("API error ({status}): {reason}")]
    Api { status: u16, reason: String },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Vote rejected: {0}")]
    Vote(#[from] VoteRejection),

    #[error("Wish not found: {0}")]
    WishNotFound(WishId),

    #[error("A submit for this draft is already in flight")]
    SubmitInProgress,

    #[error("This draft was already submitted")]
    AlreadySubmitted,

    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl WishKitError {
    /// Text for the message prompt shown to the user
    pub fn user_message(&self) -> String {
        match self {
            WishKitError::Network(_) => {
                "Could not reach the server. Please try again.".to_string()
            }
            WishKitError::Api { reason, .. } => reason.clone(),
            WishKitError::Validation(e) => e.to_string(),
            WishKitError::Vote(e) => e.to_string(),
            _ => "Something went wrong.".to_string(),
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, WishKitError::Network(_))
    }
}

impl From<TransportError> for WishKitError {
    fn from(e: TransportError) -> Self {
        if e.is_network() {
            return WishKitError::Network(e.to_string());
        }
        match e {
            TransportError::Api { status, reason } => WishKitError::Api { status, reason },
            TransportError::SerializationError(msg) | TransportError::DeserializationError(msg) => {
                WishKitError::Serialization(msg)
            }
            other => WishKitError::Internal(other.to_string()),
        }
    }
}

/// Result type alias for client operations
pub type WishKitResult<T> = Result<T, WishKitError>;
