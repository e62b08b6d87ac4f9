use sqlx::FromRow;
use tola_core::types::{DbId, Timestamp};

/// A dashboard API token row. The key itself is never stored.
#[derive(Debug, Clone, FromRow)]
pub struct ApiToken {
    pub id: DbId,
    pub user_id: DbId,
    pub key_hash: String,
    pub last_used_at: Option<Timestamp>,
    pub created_at: Timestamp,
}
