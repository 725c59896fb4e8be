//! WishKit client models
//!
//! In-app feature-request widget: users browse wishes, upvote them and
//! propose new ones.
//!
//! - [`WishListModel`]: fetches all wishes and derives the approved and
//!   implemented lists, ordered by votes
//! - [`WishDraftModel`]: title/description draft with limits, validation and
//!   a submit state machine
//! - [`submit_draft`] / [`spawn_submit`]: send a draft and report to a
//!   [`CreateWishDelegate`]
//! - [`WishKit`]: builds all of the above from a [`WishKitConfig`]
//!
//! The models depend on [`api`] traits, not on HTTP. The HTTP client from
//! `wishkit-transport` implements them.

pub mod api;
pub mod compose;
pub mod config;
pub mod draft;
pub mod error;
pub mod kit;
pub mod wishlist;

pub use api::{WishCreator, WishFetcher, WishVoter};
pub use compose::{spawn_submit, submit_draft, CreateWishDelegate, SharedDraft, SubmitOutcome};
pub use config::{DescriptionPolicy, DraftLimits, WishKitConfig};
pub use draft::{DraftField, DraftPhase, WishDraftModel};
pub use error::{ValidationError, VoteRejection, WishKitError, WishKitResult};
pub use kit::WishKit;
pub use wishlist::{
    classify, is_listed_as_approved, RefreshOutcome, SubscriptionId, WishListListener,
    WishListModel, WishListSnapshot,
};

// Re-export the shared types
pub use wishkit_types::{
    CreateWishRequest, SubmitRequest, UserId, VoteWishRequest, WishId, WishListResponse,
    WishRecord, WishState,
};
