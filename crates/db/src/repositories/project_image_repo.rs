//! Repository for the `project_images` table.

use sqlx::PgPool;
use tola_core::types::DbId;

use crate::models::project::{CreateProjectImage, ProjectImage, UpdateProjectImage};

const COLUMNS: &str = "id, project_id AS project, image, caption, is_primary, created_at";

/// Provides gallery operations for project images.
pub struct ProjectImageRepo;

impl ProjectImageRepo {
    /// Attach an image to a project, clearing the previous primary if needed.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateProjectImage,
    ) -> Result<ProjectImage, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if input.is_primary {
            sqlx::query(
                "UPDATE project_images SET is_primary = false WHERE project_id = $1 AND is_primary",
            )
            .bind(project_id)
            .execute(&mut *tx)
            .await?;
        }

        let query = format!(
            "INSERT INTO project_images (project_id, image, caption, is_primary)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let image = sqlx::query_as::<_, ProjectImage>(&query)
            .bind(project_id)
            .bind(&input.image)
            .bind(&input.caption)
            .bind(input.is_primary)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(image)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ProjectImage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_images WHERE id = $1");
        sqlx::query_as::<_, ProjectImage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List images, optionally restricted to one project. Primary first.
    pub async fn list(
        pool: &PgPool,
        project_id: Option<DbId>,
    ) -> Result<Vec<ProjectImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_images
             WHERE ($1::BIGINT IS NULL OR project_id = $1)
             ORDER BY project_id, is_primary DESC, id ASC"
        );
        sqlx::query_as::<_, ProjectImage>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProjectImage,
    ) -> Result<Option<ProjectImage>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if input.is_primary == Some(true) {
            sqlx::query(
                "UPDATE project_images SET is_primary = false
                 WHERE project_id = (SELECT project_id FROM project_images WHERE id = $1)
                   AND id <> $1 AND is_primary",
            )
            .bind(id)
            .execute(&mut *tx)
            .await?;
        }

        let query = format!(
            "UPDATE project_images SET
                caption = COALESCE($2, caption),
                is_primary = COALESCE($3, is_primary)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let image = sqlx::query_as::<_, ProjectImage>(&query)
            .bind(id)
            .bind(&input.caption)
            .bind(input.is_primary)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(image)
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_images WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
