//! Repository for the `customer_testimonials` table.

use sqlx::PgPool;
use tola_core::types::DbId;

use crate::models::testimonial::{
    CreateTestimonial, Testimonial, TestimonialFilter, UpdateTestimonial,
};

const SELECT: &str = "SELECT ct.id, ct.customer_name, ct.location, ct.testimonial, \
        ct.project_id AS project, p.title AS project_title, ct.rating, ct.date, ct.image, \
        ct.approved, ct.created_at, ct.updated_at \
     FROM customer_testimonials ct \
     LEFT JOIN projects p ON p.id = ct.project_id";

/// Provides CRUD operations for customer testimonials.
pub struct TestimonialRepo;

impl TestimonialRepo {
    /// Insert a testimonial. `approved` is taken as given; callers decide
    /// whether the submitter may set it.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTestimonial,
        approved: bool,
    ) -> Result<Testimonial, sqlx::Error> {
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO customer_testimonials
                (customer_name, location, testimonial, project_id, rating, date, image, approved)
             VALUES ($1, $2, $3, $4, COALESCE($5, 5), COALESCE($6, CURRENT_DATE), $7, $8)
             RETURNING id",
        )
        .bind(input.customer_name.trim())
        .bind(&input.location)
        .bind(input.testimonial.trim())
        .bind(input.project)
        .bind(input.rating)
        .bind(input.date)
        .bind(&input.image)
        .bind(approved)
        .fetch_one(pool)
        .await?;

        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Testimonial>, sqlx::Error> {
        let query = format!("{SELECT} WHERE ct.id = $1");
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List testimonials, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &TestimonialFilter,
        limit: i64,
    ) -> Result<Vec<Testimonial>, sqlx::Error> {
        let query = format!(
            "{SELECT}
             WHERE ($1::BOOLEAN IS NULL OR ct.approved = $1)
               AND ($2::BIGINT IS NULL OR ct.project_id = $2)
             ORDER BY ct.date DESC, ct.id DESC
             LIMIT $3"
        );
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(filter.approved)
            .bind(filter.project)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTestimonial,
    ) -> Result<Option<Testimonial>, sqlx::Error> {
        let updated: Option<DbId> = sqlx::query_scalar(
            "UPDATE customer_testimonials SET
                customer_name = COALESCE($2, customer_name),
                location = COALESCE($3, location),
                testimonial = COALESCE($4, testimonial),
                project_id = COALESCE($5, project_id),
                rating = COALESCE($6, rating),
                date = COALESCE($7, date),
                image = COALESCE($8, image),
                approved = COALESCE($9, approved)
             WHERE id = $1
             RETURNING id",
        )
        .bind(id)
        .bind(input.customer_name.as_deref().map(str::trim))
        .bind(&input.location)
        .bind(input.testimonial.as_deref().map(str::trim))
        .bind(input.project)
        .bind(input.rating)
        .bind(input.date)
        .bind(&input.image)
        .bind(input.approved)
        .fetch_optional(pool)
        .await?;

        match updated {
            Some(id) => Self::find_by_id(pool, id).await,
            None => Ok(None),
        }
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM customer_testimonials WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
