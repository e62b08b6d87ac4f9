//! Refresh sessions: issue, single-use redemption, bulk revocation.

use sqlx::PgPool;
use tola_core::types::DbId;

use crate::models::session::{NewRefreshSession, RefreshSession};

const COLUMNS: &str =
    "id, user_id, token_hash, expires_at, revoked_at, user_agent, ip_address, created_at";

pub struct SessionRepo;

impl SessionRepo {
    pub async fn issue(
        pool: &PgPool,
        session: &NewRefreshSession<'_>,
    ) -> Result<RefreshSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO refresh_sessions (user_id, token_hash, expires_at, user_agent, ip_address)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RefreshSession>(&query)
            .bind(session.user_id)
            .bind(session.token_hash)
            .bind(session.expires_at)
            .bind(&session.client.user_agent)
            .bind(&session.client.ip_address)
            .fetch_one(pool)
            .await
    }

    /// Consume a live session by token hash, returning it as it was revoked.
    ///
    /// Lookup and revocation are one statement. Of two concurrent calls with
    /// the same hash, the second re-checks `revoked_at` after the first
    /// commits and gets `None`.
    pub async fn redeem(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<RefreshSession>, sqlx::Error> {
        let query = format!(
            "UPDATE refresh_sessions SET revoked_at = NOW()
             WHERE token_hash = $1
               AND revoked_at IS NULL
               AND expires_at > NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RefreshSession>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Revoke every live session of a user. Returns how many were revoked.
    pub async fn revoke_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE refresh_sessions SET revoked_at = NOW()
             WHERE user_id = $1 AND revoked_at IS NULL",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete sessions that can no longer be redeemed.
    pub async fn purge_stale(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM refresh_sessions WHERE expires_at < NOW() OR revoked_at IS NOT NULL",
        )
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
