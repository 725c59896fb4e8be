//! WishKit Transport Layer
//!
//! This crate talks to the WishKit wish backend on behalf of the client models.
//!
//! # Features
//!
//! - `http` (default): typed HTTP client using reqwest
//! - `server`: axum router over a [`http::WishApiHandler`], used to run an
//!   in-process backend in tests
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              wishkit-transport              │
//! ├─────────────────────────────────────────────┤
//! │   http/                                     │
//! │   - types.rs    (headers, error body)       │
//! │   - client.rs   (WishApiHttpClient)         │
//! │   - server.rs   (feature = "server")        │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use wishkit_transport::http::WishApiHttpClient;
//!
//! let client = WishApiHttpClient::new("https://wishkit.example", api_key, user_uuid)?;
//! let response = client.fetch_wish_list().await?;
//! ```

pub mod error;

#[cfg(any(feature = "http", feature = "server"))]
pub mod http;

pub use error::{TransportError, TransportResult};

#[cfg(any(feature = "http", feature = "server"))]
pub use http::types::{ApiErrorResponse, API_KEY_HEADER, USER_UUID_HEADER};
