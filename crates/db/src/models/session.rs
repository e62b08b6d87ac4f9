//! Refresh sessions issued by the JWT login flow.

use sqlx::FromRow;
use tola_core::types::{DbId, Timestamp};

/// One issued refresh token. The plaintext is never stored.
#[derive(Debug, Clone, FromRow)]
pub struct RefreshSession {
    pub id: DbId,
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: Timestamp,
}

/// Where a login or refresh request came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientMeta {
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

pub struct NewRefreshSession<'a> {
    pub user_id: DbId,
    pub token_hash: &'a str,
    pub expires_at: Timestamp,
    pub client: &'a ClientMeta,
}
