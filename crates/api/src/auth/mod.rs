//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT access-token generation, validation, and refresh-token helpers.
//!
//! Static dashboard tokens live in `tola_core::api_token`.

pub mod jwt;
pub mod password;
