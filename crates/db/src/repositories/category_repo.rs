//! Repository for the `categories` table.

use sqlx::PgPool;
use tola_core::types::DbId;

use crate::models::category::{Category, CategoryFilter, CreateCategory, UpdateCategory};
use crate::slugs::{resolve_slug, SlugTable};

/// Select list joined with the product type name and tile count.
const SELECT: &str = "SELECT c.id, c.name, c.slug, c.description, c.image, \
        c.product_type_id AS product_type, pt.name AS product_type_name, \
        c.sort_order AS \"order\", c.active, c.created_at, c.updated_at, \
        (SELECT COUNT(*) FROM tiles t WHERE t.category_id = c.id) AS tiles_count \
     FROM categories c \
     LEFT JOIN product_types pt ON pt.id = c.product_type_id";

/// Provides CRUD operations for tile categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category with a unique slug derived from its name.
    pub async fn create(pool: &PgPool, input: &CreateCategory) -> Result<Category, sqlx::Error> {
        let slug = resolve_slug(pool, SlugTable::Categories, &input.name, None).await?;
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO categories (name, slug, description, image, product_type_id, sort_order, active)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 0), COALESCE($7, true))
             RETURNING id",
        )
        .bind(input.name.trim())
        .bind(&slug)
        .bind(&input.description)
        .bind(&input.image)
        .bind(input.product_type)
        .bind(input.order)
        .bind(input.active)
        .fetch_one(pool)
        .await?;

        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Find a category by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("{SELECT} WHERE c.id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List categories ordered by their display order, then name.
    pub async fn list(pool: &PgPool, filter: &CategoryFilter) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!(
            "{SELECT}
             WHERE ($1::BIGINT IS NULL OR c.product_type_id = $1)
               AND ($2::BOOLEAN IS NULL OR c.active = $2)
             ORDER BY c.sort_order, c.name"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(filter.product_type)
            .bind(filter.active)
            .fetch_all(pool)
            .await
    }

    /// Update a category. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let slug = match &input.name {
            Some(name) => Some(resolve_slug(pool, SlugTable::Categories, name, Some(id)).await?),
            None => None,
        };
        let updated: Option<DbId> = sqlx::query_scalar(
            "UPDATE categories SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                image = COALESCE($5, image),
                product_type_id = COALESCE($6, product_type_id),
                sort_order = COALESCE($7, sort_order),
                active = COALESCE($8, active)
             WHERE id = $1
             RETURNING id",
        )
        .bind(id)
        .bind(input.name.as_deref().map(str::trim))
        .bind(&slug)
        .bind(&input.description)
        .bind(&input.image)
        .bind(input.product_type)
        .bind(input.order)
        .bind(input.active)
        .fetch_optional(pool)
        .await?;

        match updated {
            Some(id) => Self::find_by_id(pool, id).await,
            None => Ok(None),
        }
    }

    /// Delete a category and (by cascade) its tiles. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
