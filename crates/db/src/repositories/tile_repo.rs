//! Repository for the `tiles` table.

use sqlx::PgPool;
use tola_core::sku::generate_sku;
use tola_core::types::DbId;

use crate::models::tile::{CreateTile, Tile, TileFilter, TileOrdering, UpdateTile};
use crate::slugs::{resolve_slug, SlugTable};

/// Select list joined with category / product type names and gallery stats.
///
/// The primary image is the flagged one, else the oldest upload.
const SELECT: &str = "SELECT t.id, t.title, t.slug, t.description, \
        t.category_id AS category, c.name AS category_name, \
        t.product_type_id AS product_type, pt.name AS product_type_name, \
        t.price::FLOAT8 AS price, t.size, t.material, t.in_stock, t.featured, t.sku, \
        t.created_at, t.updated_at, \
        (SELECT ti.image FROM tile_images ti WHERE ti.tile_id = t.id \
            ORDER BY ti.is_primary DESC, ti.id ASC LIMIT 1) AS primary_image_path, \
        (SELECT COUNT(*) FROM tile_images ti WHERE ti.tile_id = t.id) AS images_count \
     FROM tiles t \
     JOIN categories c ON c.id = t.category_id \
     LEFT JOIN product_types pt ON pt.id = t.product_type_id";

/// Provides CRUD and catalog queries for tiles.
pub struct TileRepo;

impl TileRepo {
    /// Insert a new tile with a generated slug and SKU.
    pub async fn create(pool: &PgPool, input: &CreateTile) -> Result<Tile, sqlx::Error> {
        let slug = resolve_slug(pool, SlugTable::Tiles, &input.title, None).await?;
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO tiles
                (title, slug, description, category_id, product_type_id, price, size,
                 material, in_stock, featured, sku)
             VALUES ($1, $2, $3, $4, $5, $6::NUMERIC, $7, $8,
                     COALESCE($9, true), COALESCE($10, false), $11)
             RETURNING id",
        )
        .bind(input.title.trim())
        .bind(&slug)
        .bind(&input.description)
        .bind(input.category)
        .bind(input.product_type)
        .bind(input.price)
        .bind(&input.size)
        .bind(&input.material)
        .bind(input.in_stock)
        .bind(input.featured)
        .bind(generate_sku())
        .fetch_one(pool)
        .await?;

        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Find a tile by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tile>, sqlx::Error> {
        let query = format!("{SELECT} WHERE t.id = $1");
        sqlx::query_as::<_, Tile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Filtered, ordered, paginated tile listing.
    pub async fn list(
        pool: &PgPool,
        filter: &TileFilter,
        ordering: TileOrdering,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Tile>, sqlx::Error> {
        // Build dynamic WHERE clauses.
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        if filter.category.is_some() {
            conditions.push(format!("t.category_id = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.product_type.is_some() {
            conditions.push(format!("t.product_type_id = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.featured.is_some() {
            conditions.push(format!("t.featured = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.in_stock.is_some() {
            conditions.push(format!("t.in_stock = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.material.is_some() {
            conditions.push(format!("LOWER(t.material) = LOWER(${bind_idx})"));
            bind_idx += 1;
        }
        if filter.search.is_some() {
            conditions.push(format!(
                "(t.title ILIKE ${bind_idx} ESCAPE '\\' OR t.description ILIKE ${bind_idx} ESCAPE '\\' \
                 OR t.sku ILIKE ${bind_idx} ESCAPE '\\')"
            ));
            bind_idx += 1;
        }
        if filter.min_price.is_some() {
            conditions.push(format!("t.price >= ${bind_idx}::NUMERIC"));
            bind_idx += 1;
        }
        if filter.max_price.is_some() {
            conditions.push(format!("t.price <= ${bind_idx}::NUMERIC"));
            bind_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "{SELECT} {where_clause} ORDER BY {order} LIMIT ${bind_idx} OFFSET ${next_idx}",
            order = ordering.sql(),
            next_idx = bind_idx + 1,
        );

        let mut q = sqlx::query_as::<_, Tile>(&query);

        // Bind dynamic parameters in order.
        if let Some(category) = filter.category {
            q = q.bind(category);
        }
        if let Some(product_type) = filter.product_type {
            q = q.bind(product_type);
        }
        if let Some(featured) = filter.featured {
            q = q.bind(featured);
        }
        if let Some(in_stock) = filter.in_stock {
            q = q.bind(in_stock);
        }
        if let Some(ref material) = filter.material {
            q = q.bind(material.trim().to_string());
        }
        if let Some(ref search) = filter.search {
            q = q.bind(contains_pattern(search.trim()));
        }
        if let Some(min_price) = filter.min_price {
            q = q.bind(min_price);
        }
        if let Some(max_price) = filter.max_price {
            q = q.bind(max_price);
        }

        q = q.bind(limit).bind(offset);
        q.fetch_all(pool).await
    }

    /// Featured tiles, newest first.
    pub async fn list_featured(pool: &PgPool, limit: i64) -> Result<Vec<Tile>, sqlx::Error> {
        let query = format!(
            "{SELECT} WHERE t.featured = true ORDER BY t.created_at DESC, t.id DESC LIMIT $1"
        );
        sqlx::query_as::<_, Tile>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// All tiles of a category, ordered by title.
    pub async fn list_by_category(
        pool: &PgPool,
        category_id: DbId,
    ) -> Result<Vec<Tile>, sqlx::Error> {
        let query = format!("{SELECT} WHERE t.category_id = $1 ORDER BY t.title, t.id");
        sqlx::query_as::<_, Tile>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    /// Tiles linked to a project through `project_tiles`.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Tile>, sqlx::Error> {
        let query = format!(
            "{SELECT} JOIN project_tiles ptl ON ptl.tile_id = t.id
             WHERE ptl.project_id = $1
             ORDER BY t.title, t.id"
        );
        sqlx::query_as::<_, Tile>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Return the ids from `ids` that do not match any tile.
    pub async fn find_missing_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT wanted.id FROM UNNEST($1::BIGINT[]) AS wanted(id)
             WHERE NOT EXISTS (SELECT 1 FROM tiles t WHERE t.id = wanted.id)
             ORDER BY wanted.id",
        )
        .bind(ids)
        .fetch_all(pool)
        .await
    }

    /// Update a tile. Only non-`None` fields in `input` are applied.
    ///
    /// A new title regenerates the slug; the SKU never changes. Returns
    /// `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTile,
    ) -> Result<Option<Tile>, sqlx::Error> {
        let slug = match &input.title {
            Some(title) => Some(resolve_slug(pool, SlugTable::Tiles, title, Some(id)).await?),
            None => None,
        };
        let updated: Option<DbId> = sqlx::query_scalar(
            "UPDATE tiles SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                category_id = COALESCE($5, category_id),
                product_type_id = COALESCE($6, product_type_id),
                price = COALESCE($7::NUMERIC, price),
                size = COALESCE($8, size),
                material = COALESCE($9, material),
                in_stock = COALESCE($10, in_stock),
                featured = COALESCE($11, featured)
             WHERE id = $1
             RETURNING id",
        )
        .bind(id)
        .bind(input.title.as_deref().map(str::trim))
        .bind(&slug)
        .bind(&input.description)
        .bind(input.category)
        .bind(input.product_type)
        .bind(input.price)
        .bind(&input.size)
        .bind(&input.material)
        .bind(input.in_stock)
        .bind(input.featured)
        .fetch_optional(pool)
        .await?;

        match updated {
            Some(id) => Self::find_by_id(pool, id).await,
            None => Ok(None),
        }
    }

    /// Delete a tile and its gallery. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tiles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// `%term%` with the term's own `%`, `_` and `\` matched literally.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::contains_pattern;

    #[test]
    fn wildcards_in_search_terms_are_escaped() {
        assert_eq!(contains_pattern("matte"), "%matte%");
        assert_eq!(contains_pattern("60_60"), "%60\\_60%");
        assert_eq!(contains_pattern("100%"), "%100\\%%");
        assert_eq!(contains_pattern(r"a\b"), r"%a\\b%");
    }
}
