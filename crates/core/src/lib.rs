//! Domain primitives shared by the database, API, and client layers.
//!
//! Nothing in here performs I/O.

pub mod api_token;
pub mod error;
pub mod hashing;
pub mod media;
pub mod pagination;
pub mod project_status;
pub mod slug;
pub mod sku;
pub mod types;
pub mod validation;
