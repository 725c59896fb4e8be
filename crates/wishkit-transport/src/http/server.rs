//! HTTP Server abstractions for the wish API
//!
//! Serves the same routes the client calls. Implement [`WishApiHandler`] to
//! back them with any store; the workspace uses it to run an in-process
//! backend in integration tests.

use crate::http::types::{
    ApiErrorResponse, CreateWishRequest, VoteWishRequest, WishListResponse, WishRecord,
    API_KEY_HEADER, CREATE_PATH, LIST_PATH, USER_UUID_HEADER, VOTE_PATH,
};
use async_trait::async_trait;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use wishkit_types::UserId;

/// Caller identity extracted from the request headers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub api_key: String,
    pub user_uuid: UserId,
}

/// A rejected request: status code plus the reason shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    pub status: u16,
    pub reason: String,
}

impl ApiFailure {
    pub fn new(status: u16, reason: impl Into<String>) -> Self {
        Self {
            status,
            reason: reason.into(),
        }
    }

    pub fn bad_request(reason: impl Into<String>) -> Self {
        Self::new(400, reason)
    }

    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::new(401, reason)
    }

    pub fn not_found(reason: impl Into<String>) -> Self {
        Self::new(404, reason)
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ApiErrorResponse::new(self.reason))).into_response()
    }
}

/// Handler trait for the wish API
///
/// The router authenticates nothing itself; it extracts the caller headers
/// and passes them on.
#[async_trait]
pub trait WishApiHandler: Send + Sync + 'static {
    /// GET /api/wish/list
    async fn list_wishes(&self, caller: Caller) -> Result<WishListResponse, ApiFailure>;

    /// POST /api/wish/create
    async fn create_wish(
        &self,
        caller: Caller,
        request: CreateWishRequest,
    ) -> Result<WishRecord, ApiFailure>;

    /// POST /api/wish/vote
    async fn vote_wish(
        &self,
        caller: Caller,
        request: VoteWishRequest,
    ) -> Result<WishRecord, ApiFailure>;
}

/// Create the wish API router with the given handler
///
/// # Example
///
/// ```ignore
/// let router = create_router(Arc::new(MyBackend::default()));
/// axum::serve(listener, router).await?;
/// ```
pub fn create_router<H: WishApiHandler>(handler: Arc<H>) -> Router {
    Router::new()
        .route(LIST_PATH, get(handle_list::<H>))
        .route(CREATE_PATH, post(handle_create::<H>))
        .route(VOTE_PATH, post(handle_vote::<H>))
        .with_state(handler)
}

fn caller(headers: &HeaderMap) -> Result<Caller, ApiFailure> {
    let api_key = headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiFailure::unauthorized("Missing API key"))?;

    let user_uuid = headers
        .get(USER_UUID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<UserId>().ok())
        .ok_or_else(|| ApiFailure::bad_request("Missing or invalid user UUID"))?;

    Ok(Caller {
        api_key: api_key.to_string(),
        user_uuid,
    })
}

/// Handle GET /api/wish/list
async fn handle_list<H: WishApiHandler>(
    State(handler): State<Arc<H>>,
    headers: HeaderMap,
) -> Result<Json<WishListResponse>, ApiFailure> {
    let caller = caller(&headers)?;
    let response = handler.list_wishes(caller).await?;
    Ok(Json(response))
}

/// Handle POST /api/wish/create
async fn handle_create<H: WishApiHandler>(
    State(handler): State<Arc<H>>,
    headers: HeaderMap,
    Json(request): Json<CreateWishRequest>,
) -> Result<Json<WishRecord>, ApiFailure> {
    let caller = caller(&headers)?;

    info!(user = %caller.user_uuid, "Received create-wish request");

    match handler.create_wish(caller, request).await {
        Ok(wish) => Ok(Json(wish)),
        Err(failure) => {
            warn!(status = failure.status, reason = %failure.reason, "Create-wish rejected");
            Err(failure)
        }
    }
}

/// Handle POST /api/wish/vote
async fn handle_vote<H: WishApiHandler>(
    State(handler): State<Arc<H>>,
    headers: HeaderMap,
    Json(request): Json<VoteWishRequest>,
) -> Result<Json<WishRecord>, ApiFailure> {
    let caller = caller(&headers)?;

    info!(user = %caller.user_uuid, wish_id = %request.wish_id, "Received vote request");

    let wish = handler.vote_wish(caller, request).await?;
    Ok(Json(wish))
}

/// Serve the wish API on an already bound listener until the task is dropped
pub async fn start_server<H: WishApiHandler>(
    listener: TcpListener,
    handler: Arc<H>,
) -> anyhow::Result<()> {
    let app = create_router(handler);

    info!(address = %listener.local_addr()?, "Starting wish API server");

    axum::serve(listener, app).await?;

    Ok(())
}
