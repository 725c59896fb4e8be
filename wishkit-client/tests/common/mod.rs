//! Fakes shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use wishkit_client::{
    CreateWishDelegate, CreateWishRequest, UserId, VoteWishRequest, WishCreator, WishFetcher,
    WishKitError, WishKitResult, WishListListener, WishListResponse, WishListSnapshot, WishRecord,
    WishState, WishVoter,
};
use wishkit_types::{Uuid, VotingUser};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

pub fn user(n: u8) -> UserId {
    UserId::from_str(&format!("00000000-0000-4000-8000-0000000000{n:02}")).unwrap()
}

pub fn wish(id: u128, state: WishState, owner: UserId, votes: u8) -> WishRecord {
    WishRecord::new(owner, format!("wish {id}"), "")
        .with_id(Uuid::from_u128(id))
        .with_state(state)
        .with_voters((0..votes).map(|v| user(50 + v)))
}

pub fn ids(wishes: &[WishRecord]) -> Vec<u128> {
    wishes.iter().map(|w| w.id.as_u128()).collect()
}

type FetchResult = WishKitResult<WishListResponse>;

/// Fetcher whose calls block until the test releases them
///
/// Every call takes the next gate created with [`GatedFetcher::gate`] and
/// reports its call index on the `started` channel before waiting.
pub struct GatedFetcher {
    gates: Mutex<VecDeque<oneshot::Receiver<FetchResult>>>,
    started: mpsc::UnboundedSender<usize>,
    calls: AtomicUsize,
}

impl GatedFetcher {
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<usize>) {
        let (started, started_rx) = mpsc::unbounded_channel();
        let fetcher = Arc::new(Self {
            gates: Mutex::new(VecDeque::new()),
            started,
            calls: AtomicUsize::new(0),
        });
        (fetcher, started_rx)
    }

    pub fn gate(&self) -> oneshot::Sender<FetchResult> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().push_back(rx);
        tx
    }
}

#[async_trait]
impl WishFetcher for GatedFetcher {
    async fn fetch_wish_list(&self) -> FetchResult {
        let gate = self.gates.lock().pop_front();
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let _ = self.started.send(call);

        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(WishKitError::Internal("gate dropped".into()))),
            None => Err(WishKitError::Internal("no gate prepared".into())),
        }
    }
}

/// In-memory backend implementing every collaborator trait
pub struct FakeBackend {
    pub caller: UserId,
    pub wishes: Mutex<Vec<WishRecord>>,
    fail_next: Mutex<Option<WishKitError>>,
    pub created: Mutex<Vec<CreateWishRequest>>,
    pub votes: Mutex<Vec<VoteWishRequest>>,
}

impl FakeBackend {
    pub fn new(caller: UserId, wishes: Vec<WishRecord>) -> Arc<Self> {
        Arc::new(Self {
            caller,
            wishes: Mutex::new(wishes),
            fail_next: Mutex::new(None),
            created: Mutex::new(Vec::new()),
            votes: Mutex::new(Vec::new()),
        })
    }

    /// Make the next call of any kind fail with `error`
    pub fn fail_next(&self, error: WishKitError) {
        *self.fail_next.lock() = Some(error);
    }

    fn take_failure(&self) -> WishKitResult<()> {
        match self.fail_next.lock().take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl WishFetcher for FakeBackend {
    async fn fetch_wish_list(&self) -> FetchResult {
        self.take_failure()?;
        Ok(WishListResponse::new(self.wishes.lock().clone()))
    }
}

#[async_trait]
impl WishCreator for FakeBackend {
    async fn create_wish(&self, request: CreateWishRequest) -> WishKitResult<WishRecord> {
        self.created.lock().push(request.clone());
        self.take_failure()?;

        let wish = WishRecord::new(self.caller, request.title, request.description);
        self.wishes.lock().push(wish.clone());
        Ok(wish)
    }
}

#[async_trait]
impl WishVoter for FakeBackend {
    async fn vote_wish(&self, request: VoteWishRequest) -> WishKitResult<WishRecord> {
        self.votes.lock().push(request);
        self.take_failure()?;

        let mut wishes = self.wishes.lock();
        let wish = wishes
            .iter_mut()
            .find(|w| w.id == request.wish_id)
            .ok_or(WishKitError::Api {
                status: 404,
                reason: "Wish not found".into(),
            })?;
        wish.voting_users.push(VotingUser::new(self.caller));
        Ok(wish.clone())
    }
}

/// Listener recording everything it is told
#[derive(Default)]
pub struct RecordingListener {
    pub snapshots: Mutex<Vec<WishListSnapshot>>,
    pub failures: Mutex<Vec<String>>,
}

impl WishListListener for RecordingListener {
    fn wishlist_changed(&self, snapshot: &WishListSnapshot) {
        self.snapshots.lock().push(snapshot.clone());
    }

    fn refresh_failed(&self, error: &WishKitError) {
        self.failures.lock().push(error.user_message());
    }
}

/// Delegate recording created wishes and failure messages
#[derive(Default)]
pub struct RecordingDelegate {
    pub created: Mutex<Vec<WishRecord>>,
    pub failures: Mutex<Vec<String>>,
}

impl CreateWishDelegate for RecordingDelegate {
    fn new_wish_was_successfully_created(&self, wish: &WishRecord) {
        self.created.lock().push(wish.clone());
    }

    fn wish_creation_failed(&self, error: &WishKitError) {
        self.failures.lock().push(error.user_message());
    }
}
