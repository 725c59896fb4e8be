//! HTTP transport module
//!
//! Client (and optional test server) for the WishKit wish API.

pub mod types;

#[cfg(feature = "http")]
pub mod client;

#[cfg(feature = "server")]
pub mod server;

pub use types::{ApiErrorResponse, API_KEY_HEADER, USER_UUID_HEADER};

#[cfg(feature = "http")]
pub use client::{WishApiHttpClient, WishApiClientConfig};

#[cfg(feature = "server")]
pub use server::{create_router, start_server, ApiFailure, Caller, WishApiHandler};
