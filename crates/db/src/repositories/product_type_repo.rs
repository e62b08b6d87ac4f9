//! Repository for the `product_types` table.

use sqlx::PgPool;
use tola_core::types::DbId;

use crate::models::product_type::{
    CreateProductType, ProductType, ProductTypeFilter, UpdateProductType,
};
use crate::slugs::{resolve_slug, SlugTable};

/// Select list including related-row counts.
const SELECT: &str = "SELECT pt.id, pt.name, pt.slug, pt.description, pt.image, pt.icon_name, \
        pt.display_order, pt.active, pt.show_in_navbar, pt.created_at, pt.updated_at, \
        (SELECT COUNT(*) FROM tiles t WHERE t.product_type_id = pt.id) AS tiles_count, \
        (SELECT COUNT(*) FROM categories c WHERE c.product_type_id = pt.id) AS categories_count \
     FROM product_types pt";

/// Provides CRUD operations for product types.
pub struct ProductTypeRepo;

impl ProductTypeRepo {
    /// Insert a new product type with a unique slug derived from its name.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProductType,
    ) -> Result<ProductType, sqlx::Error> {
        let slug = resolve_slug(pool, SlugTable::ProductTypes, &input.name, None).await?;
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO product_types
                (name, slug, description, image, icon_name, display_order, active, show_in_navbar)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 0), COALESCE($7, true), COALESCE($8, true))
             RETURNING id",
        )
        .bind(input.name.trim())
        .bind(&slug)
        .bind(&input.description)
        .bind(&input.image)
        .bind(&input.icon_name)
        .bind(input.display_order)
        .bind(input.active)
        .bind(input.show_in_navbar)
        .fetch_one(pool)
        .await?;

        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Find a product type by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ProductType>, sqlx::Error> {
        let query = format!("{SELECT} WHERE pt.id = $1");
        sqlx::query_as::<_, ProductType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List product types ordered for navigation display.
    pub async fn list(
        pool: &PgPool,
        filter: &ProductTypeFilter,
    ) -> Result<Vec<ProductType>, sqlx::Error> {
        let query = format!(
            "{SELECT}
             WHERE ($1::BOOLEAN IS NULL OR pt.active = $1)
               AND ($2::BOOLEAN IS NULL OR pt.show_in_navbar = $2)
             ORDER BY pt.display_order, pt.name"
        );
        sqlx::query_as::<_, ProductType>(&query)
            .bind(filter.active)
            .bind(filter.show_in_navbar)
            .fetch_all(pool)
            .await
    }

    /// Update a product type. Only non-`None` fields in `input` are applied.
    ///
    /// A new name regenerates the slug. Returns `None` if no row with the
    /// given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProductType,
    ) -> Result<Option<ProductType>, sqlx::Error> {
        let slug = match &input.name {
            Some(name) => Some(resolve_slug(pool, SlugTable::ProductTypes, name, Some(id)).await?),
            None => None,
        };
        let updated: Option<DbId> = sqlx::query_scalar(
            "UPDATE product_types SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                image = COALESCE($5, image),
                icon_name = COALESCE($6, icon_name),
                display_order = COALESCE($7, display_order),
                active = COALESCE($8, active),
                show_in_navbar = COALESCE($9, show_in_navbar)
             WHERE id = $1
             RETURNING id",
        )
        .bind(id)
        .bind(input.name.as_deref().map(str::trim))
        .bind(&slug)
        .bind(&input.description)
        .bind(&input.image)
        .bind(&input.icon_name)
        .bind(input.display_order)
        .bind(input.active)
        .bind(input.show_in_navbar)
        .fetch_optional(pool)
        .await?;

        match updated {
            Some(id) => Self::find_by_id(pool, id).await,
            None => Ok(None),
        }
    }

    /// Delete a product type. Linked categories, tiles and projects keep
    /// existing with a null product type. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM product_types WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
