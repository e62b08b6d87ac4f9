//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Resolves the caller from a `Bearer` JWT or a `Token` API key.
//! - [`auth::MaybeUser`] -- Same, but anonymous callers are allowed.
//! - [`rbac::RequireStaff`] -- Requires an active staff user.
//! - [`origin::RequestOrigin`] -- User agent and client address of the caller.

pub mod auth;
pub mod origin;
pub mod rbac;
