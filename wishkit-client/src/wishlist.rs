//! Wishlist model - fetched wishes and the two lists shown to the user
//!
//! The model keeps the last fetched list as its source of truth and derives:
//! - `approved`: approved wishes plus the current user's own pending wishes
//! - `implemented`: implemented wishes
//!
//! Both are sorted by vote count, highest first. The sort is stable, so wishes
//! with equal votes keep the order the backend returned them in.
//!
//! ## Publication
//!
//! The source list and both derived lists live in one immutable
//! [`WishListSnapshot`] that is swapped as a whole. Readers and listeners only
//! ever see a complete snapshot.
//!
//! ## Stale responses
//!
//! Each `refresh()` takes a sequence number before awaiting the fetch. Only
//! the completion of the most recently issued refresh is applied; older ones
//! are dropped without touching state or listeners. An applied vote also
//! takes a number, so a refresh fetched before the vote cannot undo it.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};
use wishkit_types::{UserId, VoteWishRequest, WishId, WishRecord, WishState};

use crate::api::{WishFetcher, WishVoter};
use crate::error::{VoteRejection, WishKitError, WishKitResult};

/// Whether `wish` belongs in the approved list for `current_user`
pub fn is_listed_as_approved(wish: &WishRecord, current_user: &UserId) -> bool {
    let own_pending = wish.state == WishState::Pending && wish.is_owned_by(current_user);
    wish.state == WishState::Approved || own_pending
}

/// Split `wishes` into the approved and implemented display lists
pub fn classify(wishes: &[WishRecord], current_user: &UserId) -> (Vec<WishRecord>, Vec<WishRecord>) {
    let mut approved: Vec<WishRecord> = wishes
        .iter()
        .filter(|wish| is_listed_as_approved(wish, current_user))
        .cloned()
        .collect();

    let mut implemented: Vec<WishRecord> = wishes
        .iter()
        .filter(|wish| wish.state == WishState::Implemented)
        .cloned()
        .collect();

    sort_by_votes(&mut approved);
    sort_by_votes(&mut implemented);

    (approved, implemented)
}

// `sort_by` is stable
fn sort_by_votes(wishes: &mut [WishRecord]) {
    wishes.sort_by(|a, b| b.vote_count().cmp(&a.vote_count()));
}

/// One consistent view of the wishlist
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WishListSnapshot {
    /// Wishes in backend order
    pub all: Vec<WishRecord>,
    pub approved: Vec<WishRecord>,
    pub implemented: Vec<WishRecord>,
    /// Incremented on every publication; 0 means nothing was published yet
    pub generation: u64,
}

impl WishListSnapshot {
    pub fn build(all: Vec<WishRecord>, current_user: &UserId, generation: u64) -> Self {
        let (approved, implemented) = classify(&all, current_user);
        Self {
            all,
            approved,
            implemented,
            generation,
        }
    }

    pub fn find(&self, wish_id: &WishId) -> Option<&WishRecord> {
        self.all.iter().find(|wish| &wish.id == wish_id)
    }
}

/// Receives wishlist updates
///
/// Called synchronously, after the new snapshot is in place and with no
/// model lock held, so listeners may read the model again.
pub trait WishListListener: Send + Sync {
    fn wishlist_changed(&self, snapshot: &WishListSnapshot);

    /// A refresh failed; the previous lists stay in place
    fn refresh_failed(&self, _error: &WishKitError) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Result of a completed `refresh()`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The fetched list is now published
    Applied { wishes: usize },
    /// A newer refresh was issued while this one was in flight; its result was dropped
    Superseded,
}

/// Wishlist model
pub struct WishListModel {
    current_user: UserId,
    fetcher: Arc<dyn WishFetcher>,
    voter: Arc<dyn WishVoter>,
    snapshot: RwLock<Arc<WishListSnapshot>>,
    /// Sequence number of the latest issued refresh or applied vote
    issued: AtomicU64,
    listeners: RwLock<Vec<(SubscriptionId, Arc<dyn WishListListener>)>>,
    next_subscription: AtomicU64,
}

impl WishListModel {
    /// Create a model backed by one API object serving both fetches and votes
    pub fn new<A>(current_user: UserId, api: Arc<A>) -> Self
    where
        A: WishFetcher + WishVoter + 'static,
    {
        Self::from_parts(current_user, api.clone(), api)
    }

    pub fn from_parts(
        current_user: UserId,
        fetcher: Arc<dyn WishFetcher>,
        voter: Arc<dyn WishVoter>,
    ) -> Self {
        Self {
            current_user,
            fetcher,
            voter,
            snapshot: RwLock::new(Arc::new(WishListSnapshot::default())),
            issued: AtomicU64::new(0),
            listeners: RwLock::new(Vec::new()),
            next_subscription: AtomicU64::new(0),
        }
    }

    pub fn current_user(&self) -> &UserId {
        &self.current_user
    }

    // ========== Accessors ==========

    /// Current snapshot
    pub fn snapshot(&self) -> Arc<WishListSnapshot> {
        self.snapshot.read().clone()
    }

    pub fn all_wishes(&self) -> Vec<WishRecord> {
        self.snapshot.read().all.clone()
    }

    pub fn approved_wishlist(&self) -> Vec<WishRecord> {
        self.snapshot.read().approved.clone()
    }

    pub fn implemented_wishlist(&self) -> Vec<WishRecord> {
        self.snapshot.read().implemented.clone()
    }

    // ========== Subscriptions ==========

    pub fn subscribe(&self, listener: Arc<dyn WishListListener>) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.listeners.write().push((id, listener));
        id
    }

    /// Returns false if `id` was not subscribed
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|(sub, _)| *sub != id);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    // ========== Refresh ==========

    /// Fetch the wish list and publish it
    ///
    /// On failure the previous lists stay in place, listeners get
    /// `refresh_failed`, and the error is returned. A superseded refresh
    /// returns `Ok(RefreshOutcome::Superseded)` whether it succeeded or not.
    pub async fn refresh(&self) -> WishKitResult<RefreshOutcome> {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(seq = seq, "Refreshing wish list");

        let result = self.fetcher.fetch_wish_list().await;

        let published = {
            let mut current = self.snapshot.write();

            let latest = self.issued.load(Ordering::SeqCst);
            if latest != seq {
                debug!(seq = seq, latest = latest, "Dropping superseded refresh");
                return Ok(RefreshOutcome::Superseded);
            }

            match result {
                Ok(response) => {
                    let next = Arc::new(WishListSnapshot::build(
                        response.list,
                        &self.current_user,
                        current.generation + 1,
                    ));
                    *current = next.clone();
                    Ok(next)
                }
                Err(e) => Err(e),
            }
        };

        match published {
            Ok(snapshot) => {
                info!(
                    seq = seq,
                    wishes = snapshot.all.len(),
                    approved = snapshot.approved.len(),
                    implemented = snapshot.implemented.len(),
                    "Wish list refreshed"
                );
                self.notify_changed(&snapshot);
                Ok(RefreshOutcome::Applied {
                    wishes: snapshot.all.len(),
                })
            }
            Err(e) => {
                warn!(seq = seq, error = %e, "Wish list refresh failed, keeping previous list");
                self.notify_failed(&e);
                Err(e)
            }
        }
    }

    // ========== Voting ==========

    /// Upvote `wish_id` as the current user
    ///
    /// Refused locally if the wish is unknown, already implemented, or already
    /// voted for by this user. On success the returned record replaces the
    /// local one and the lists are republished. Refreshes still in flight at
    /// that point resolve to `Superseded`.
    pub async fn vote(&self, wish_id: WishId) -> WishKitResult<WishRecord> {
        {
            let snapshot = self.snapshot.read();
            let wish = snapshot
                .find(&wish_id)
                .ok_or(WishKitError::WishNotFound(wish_id))?;

            if wish.state == WishState::Implemented {
                return Err(VoteRejection::AlreadyImplemented.into());
            }
            if wish.has_voted(&self.current_user) {
                return Err(VoteRejection::AlreadyVoted.into());
            }
        }

        let updated = self.voter.vote_wish(VoteWishRequest::new(wish_id)).await?;

        // refreshes issued before the vote may carry the pre-vote record
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(seq = seq, wish_id = %wish_id, "Vote supersedes in-flight refreshes");

        let published = {
            let mut current = self.snapshot.write();
            match current.all.iter().position(|wish| wish.id == updated.id) {
                Some(index) => {
                    let mut all = current.all.clone();
                    all[index] = updated.clone();
                    let next = Arc::new(WishListSnapshot::build(
                        all,
                        &self.current_user,
                        current.generation + 1,
                    ));
                    *current = next.clone();
                    Some(next)
                }
                None => None,
            }
        };

        match published {
            Some(snapshot) => {
                info!(wish_id = %wish_id, votes = updated.vote_count(), "Vote applied");
                self.notify_changed(&snapshot);
            }
            None => debug!(wish_id = %wish_id, "Voted wish no longer listed"),
        }

        Ok(updated)
    }

    fn listeners_snapshot(&self) -> Vec<Arc<dyn WishListListener>> {
        self.listeners
            .read()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect()
    }

    fn notify_changed(&self, snapshot: &WishListSnapshot) {
        for listener in self.listeners_snapshot() {
            listener.wishlist_changed(snapshot);
        }
    }

    fn notify_failed(&self, error: &WishKitError) {
        for listener in self.listeners_snapshot() {
            listener.refresh_failed(error);
        }
    }
}
