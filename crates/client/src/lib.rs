//! Typed HTTP client for the Tola Tiles API.
//!
//! [`ApiClient`] attaches the stored credential to every request and
//! transparently refreshes an expired JWT once. Credentials live in a
//! [`TokenStore`] so they survive restarts when a [`FileTokenStore`] is used.

pub mod api;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod storage;

pub use api::{ApiClient, ClientConfig};
pub use error::ClientError;
pub use session::Session;
pub use storage::{FileTokenStore, MemoryTokenStore, StoredAuth, TokenStore};
