// ========== Core Modules ==========
pub mod user;           // Opaque user identity
pub mod wish;           // Wish records as delivered by the backend
pub mod request;        // Requests built by the client models

// Export commonly used types
pub use user::{UserId, VotingUser};
pub use wish::{WishId, WishRecord, WishState, now_millis};
pub use request::{CreateWishRequest, SubmitRequest, VoteWishRequest, WishListResponse};

// Re-export uuid
pub use uuid::Uuid;

// Error types
#[derive(Debug, thiserror::Error)]
pub enum TypesError {
    #[error("Invalid user id: {0}")]
    InvalidUserId(String),
}
