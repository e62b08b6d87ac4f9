//! Repository for the `tile_images` table.

use sqlx::PgPool;
use tola_core::types::DbId;

use crate::models::tile::{CreateTileImage, TileImage, UpdateTileImage};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, tile_id AS tile, image, thumbnail, caption, is_primary, created_at";

/// Provides gallery operations for tile images.
pub struct TileImageRepo;

impl TileImageRepo {
    /// Attach an image to a tile. Marking it primary clears the flag on the
    /// tile's other images in the same transaction.
    pub async fn create(
        pool: &PgPool,
        tile_id: DbId,
        input: &CreateTileImage,
    ) -> Result<TileImage, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if input.is_primary {
            sqlx::query("UPDATE tile_images SET is_primary = false WHERE tile_id = $1 AND is_primary")
                .bind(tile_id)
                .execute(&mut *tx)
                .await?;
        }

        let query = format!(
            "INSERT INTO tile_images (tile_id, image, thumbnail, caption, is_primary)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let image = sqlx::query_as::<_, TileImage>(&query)
            .bind(tile_id)
            .bind(&input.image)
            .bind(&input.thumbnail)
            .bind(&input.caption)
            .bind(input.is_primary)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(image)
    }

    /// Find a tile image by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TileImage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tile_images WHERE id = $1");
        sqlx::query_as::<_, TileImage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a tile's gallery, primary first.
    pub async fn list_by_tile(pool: &PgPool, tile_id: DbId) -> Result<Vec<TileImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tile_images WHERE tile_id = $1 ORDER BY is_primary DESC, id ASC"
        );
        sqlx::query_as::<_, TileImage>(&query)
            .bind(tile_id)
            .fetch_all(pool)
            .await
    }

    /// Update caption / thumbnail / primary flag.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTileImage,
    ) -> Result<Option<TileImage>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if input.is_primary == Some(true) {
            sqlx::query(
                "UPDATE tile_images SET is_primary = false
                 WHERE tile_id = (SELECT tile_id FROM tile_images WHERE id = $1)
                   AND id <> $1 AND is_primary",
            )
            .bind(id)
            .execute(&mut *tx)
            .await?;
        }

        let query = format!(
            "UPDATE tile_images SET
                thumbnail = COALESCE($2, thumbnail),
                caption = COALESCE($3, caption),
                is_primary = COALESCE($4, is_primary)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let image = sqlx::query_as::<_, TileImage>(&query)
            .bind(id)
            .bind(&input.thumbnail)
            .bind(&input.caption)
            .bind(input.is_primary)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(image)
    }

    /// Delete a tile image. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tile_images WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
