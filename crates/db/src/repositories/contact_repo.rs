//! Repository for contact-form submissions.

use sqlx::PgPool;
use tola_core::types::DbId;

use crate::models::contact::{Contact, ContactFilter, CreateContact};

const COLUMNS: &str = "id, name, email, phone, subject, message, responded, created_at";

pub struct ContactRepo;

impl ContactRepo {
    /// Store a submission. `email` is expected to be normalised already.
    pub async fn create(pool: &PgPool, input: &CreateContact) -> Result<Contact, sqlx::Error> {
        let query = format!(
            "INSERT INTO contacts (name, email, phone, subject, message)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(input.name.trim())
            .bind(input.email.trim())
            .bind(&input.phone)
            .bind(input.subject.trim())
            .bind(input.message.trim())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Contact>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contacts WHERE id = $1");
        sqlx::query_as::<_, Contact>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List submissions, newest first.
    pub async fn list(pool: &PgPool, filter: &ContactFilter) -> Result<Vec<Contact>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contacts
             WHERE ($1::BOOLEAN IS NULL OR responded = $1)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(filter.responded)
            .fetch_all(pool)
            .await
    }

    pub async fn set_responded(
        pool: &PgPool,
        id: DbId,
        responded: bool,
    ) -> Result<Option<Contact>, sqlx::Error> {
        let query = format!("UPDATE contacts SET responded = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Contact>(&query)
            .bind(id)
            .bind(responded)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
