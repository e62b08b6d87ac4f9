//! Repository for the `api_tokens` table.

use sqlx::PgPool;
use tola_core::types::DbId;

use crate::models::api_token::ApiToken;
use crate::models::user::User;

/// Provides issue / lookup / revoke for dashboard API tokens.
pub struct ApiTokenRepo;

impl ApiTokenRepo {
    /// Store `key_hash` as the user's token, replacing any previous one.
    pub async fn replace_for_user(
        pool: &PgPool,
        user_id: DbId,
        key_hash: &str,
    ) -> Result<ApiToken, sqlx::Error> {
        sqlx::query_as::<_, ApiToken>(
            "INSERT INTO api_tokens (user_id, key_hash)
             VALUES ($1, $2)
             ON CONFLICT (user_id) DO UPDATE
                SET key_hash = EXCLUDED.key_hash, created_at = NOW(), last_used_at = NULL
             RETURNING id, user_id, key_hash, last_used_at, created_at",
        )
        .bind(user_id)
        .bind(key_hash)
        .fetch_one(pool)
        .await
    }

    /// Resolve the owner of a token hash and stamp `last_used_at`.
    pub async fn find_user_by_key_hash(
        pool: &PgPool,
        key_hash: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "WITH touched AS (
                UPDATE api_tokens SET last_used_at = NOW()
                WHERE key_hash = $1
                RETURNING user_id
             )
             SELECT u.id, u.username, u.email, u.password_hash, u.first_name, u.last_name,
                    u.is_staff, u.is_active, u.last_login_at, u.failed_login_count,
                    u.locked_until, u.created_at, u.updated_at
             FROM users u JOIN touched ON touched.user_id = u.id",
        )
        .bind(key_hash)
        .fetch_optional(pool)
        .await
    }

    /// Delete the user's token. Returns `true` if one existed.
    pub async fn delete_for_user(pool: &PgPool, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM api_tokens WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
