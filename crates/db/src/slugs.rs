//! Unique slug resolution against a catalog table.

use sqlx::PgPool;
use tola_core::slug::{generate_slug, unique_slug};
use tola_core::types::DbId;

/// Tables that carry a `slug` column. Keeps table names out of caller input.
#[derive(Debug, Clone, Copy)]
pub enum SlugTable {
    ProductTypes,
    Categories,
    Tiles,
    Projects,
}

impl SlugTable {
    fn name(self) -> &'static str {
        match self {
            SlugTable::ProductTypes => "product_types",
            SlugTable::Categories => "categories",
            SlugTable::Tiles => "tiles",
            SlugTable::Projects => "projects",
        }
    }
}

/// Derive a slug from `title` that no other row of `table` uses.
///
/// `exclude_id` skips the row being updated so it can keep its own slug.
pub async fn resolve_slug(
    pool: &PgPool,
    table: SlugTable,
    title: &str,
    exclude_id: Option<DbId>,
) -> Result<String, sqlx::Error> {
    let base = generate_slug(title);
    let query = format!(
        "SELECT slug FROM {} WHERE (slug = $1 OR slug LIKE $1 || '-%') \
         AND ($2::BIGINT IS NULL OR id <> $2)",
        table.name()
    );
    let taken: Vec<String> = sqlx::query_scalar(&query)
        .bind(&base)
        .bind(exclude_id)
        .fetch_all(pool)
        .await?;
    Ok(unique_slug(&base, &taken))
}
