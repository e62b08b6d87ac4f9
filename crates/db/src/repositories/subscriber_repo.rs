//! Repository for newsletter subscribers.

use sqlx::PgPool;

use crate::models::subscriber::{SubscribeOutcome, Subscriber, SubscriberFilter};

const COLUMNS: &str = "id, email, name, active, created_at";

/// Upsert result; `inserted` is false when the conflict branch ran.
#[derive(sqlx::FromRow)]
struct UpsertRow {
    #[sqlx(flatten)]
    subscriber: Subscriber,
    inserted: bool,
}

pub struct SubscriberRepo;

impl SubscriberRepo {
    /// Subscribe `email`, reactivating an existing row instead of duplicating it.
    ///
    /// `email` must already be trimmed and lower-cased. A provided `name`
    /// overwrites the stored one.
    pub async fn subscribe(
        pool: &PgPool,
        email: &str,
        name: Option<&str>,
    ) -> Result<SubscribeOutcome, sqlx::Error> {
        let query = format!(
            "INSERT INTO subscribers (email, name)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_subscribers_email DO UPDATE SET
                active = true,
                name = COALESCE(EXCLUDED.name, subscribers.name)
             RETURNING {COLUMNS}, (xmax = 0) AS inserted"
        );
        let row = sqlx::query_as::<_, UpsertRow>(&query)
            .bind(email)
            .bind(name)
            .fetch_one(pool)
            .await?;

        Ok(if row.inserted {
            SubscribeOutcome::Created(row.subscriber)
        } else {
            SubscribeOutcome::Reactivated(row.subscriber)
        })
    }

    /// Deactivate a subscription. Returns `false` for an unknown address.
    pub async fn unsubscribe(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE subscribers SET active = false WHERE email = $1")
            .bind(email)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list(
        pool: &PgPool,
        filter: &SubscriberFilter,
    ) -> Result<Vec<Subscriber>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM subscribers
             WHERE ($1::BOOLEAN IS NULL OR active = $1)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Subscriber>(&query)
            .bind(filter.active)
            .fetch_all(pool)
            .await
    }
}
