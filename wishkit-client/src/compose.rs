//! Submitting a draft
//!
//! The compose screen owns the draft behind an `Arc<Mutex<_>>`. A submit only
//! keeps a `Weak` to it while the create request is in flight: if the screen
//! drops the draft before the backend answers, the answer is logged and
//! otherwise ignored.

use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use wishkit_types::{SubmitRequest, WishRecord};

use crate::api::WishCreator;
use crate::draft::WishDraftModel;
use crate::error::{WishKitError, WishKitResult};

/// Draft shared between a compose screen and in-flight submits
pub type SharedDraft = Arc<Mutex<WishDraftModel>>;

/// Receives the result of a submit
///
/// Typically the screen that presented the compose screen, so it can refresh
/// its wishlist.
pub trait CreateWishDelegate: Send + Sync {
    fn new_wish_was_successfully_created(&self, wish: &WishRecord);

    /// The draft is back in editing with its text intact
    fn wish_creation_failed(&self, _error: &WishKitError) {}
}

/// How a submit ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(WishRecord),
    /// The draft was dropped before the request finished; nothing was updated
    Detached,
}

/// Submit the draft behind `draft` through `creator`
///
/// Fails without sending anything if the draft is invalid or already in
/// flight. A backend failure is reported to the delegate and returned; the
/// draft keeps its text.
pub async fn submit_draft(
    draft: &Weak<Mutex<WishDraftModel>>,
    creator: &dyn WishCreator,
    delegate: &dyn CreateWishDelegate,
) -> WishKitResult<SubmitOutcome> {
    let Some(shared) = draft.upgrade() else {
        debug!("Draft dropped before submit started");
        return Ok(SubmitOutcome::Detached);
    };
    let request = shared.lock().begin_submit()?;
    drop(shared);

    let result = match request {
        SubmitRequest::Create(create) => creator.create_wish(create).await,
    };

    let Some(shared) = draft.upgrade() else {
        debug!(success = result.is_ok(), "Draft dropped while create request was in flight");
        return Ok(SubmitOutcome::Detached);
    };

    shared.lock().finish_submit(result.as_ref());

    match result {
        Ok(wish) => {
            info!(wish_id = %wish.id, "Wish created");
            delegate.new_wish_was_successfully_created(&wish);
            Ok(SubmitOutcome::Created(wish))
        }
        Err(e) => {
            warn!(error = %e, "Wish creation failed");
            delegate.wish_creation_failed(&e);
            Err(e)
        }
    }
}

/// Run [`submit_draft`] on the tokio runtime
pub fn spawn_submit(
    draft: &SharedDraft,
    creator: Arc<dyn WishCreator>,
    delegate: Arc<dyn CreateWishDelegate>,
) -> JoinHandle<WishKitResult<SubmitOutcome>> {
    let draft = Arc::downgrade(draft);
    tokio::spawn(async move { submit_draft(&draft, creator.as_ref(), delegate.as_ref()).await })
}
