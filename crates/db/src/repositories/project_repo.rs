//! Repository for the `projects` table and its `project_tiles` links.

use sqlx::PgPool;
use tola_core::project_status::DEFAULT_STATUS;
use tola_core::types::DbId;

use crate::models::project::{CreateProject, Project, ProjectFilter, UpdateProject};
use crate::slugs::{resolve_slug, SlugTable};

/// Select list joined with the product type name, gallery and testimonial stats.
const SELECT: &str = "SELECT p.id, p.title, p.slug, p.description, p.client, p.location, \
        p.completed_date, p.status, p.featured, \
        p.product_type_id AS product_type, pt.name AS product_type_name, \
        p.area_size, p.testimonial, p.created_at, p.updated_at, \
        (SELECT pi.image FROM project_images pi WHERE pi.project_id = p.id \
            ORDER BY pi.is_primary DESC, pi.id ASC LIMIT 1) AS primary_image_path, \
        (SELECT COUNT(*) FROM project_images pi WHERE pi.project_id = p.id) AS images_count, \
        (SELECT COUNT(*) FROM customer_testimonials ct WHERE ct.project_id = p.id) \
            AS testimonials_count \
     FROM projects p \
     LEFT JOIN product_types pt ON pt.id = p.product_type_id";

/// Newest completion first; undated projects sink to the end.
const ORDER: &str = "p.completed_date DESC NULLS LAST, p.created_at DESC, p.id DESC";

/// Provides CRUD operations for showcase projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project with a unique slug derived from its title.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let slug = resolve_slug(pool, SlugTable::Projects, &input.title, None).await?;
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO projects
                (title, slug, description, client, location, completed_date, status,
                 featured, product_type_id, area_size, testimonial)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, $8), COALESCE($9, false), $10, $11, $12)
             RETURNING id",
        )
        .bind(input.title.trim())
        .bind(&slug)
        .bind(&input.description)
        .bind(&input.client)
        .bind(&input.location)
        .bind(input.completed_date)
        .bind(&input.status)
        .bind(DEFAULT_STATUS)
        .bind(input.featured)
        .bind(input.product_type)
        .bind(&input.area_size)
        .bind(&input.testimonial)
        .fetch_one(pool)
        .await?;

        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Find a project by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("{SELECT} WHERE p.id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List projects matching `filter`.
    pub async fn list(
        pool: &PgPool,
        filter: &ProjectFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "{SELECT}
             WHERE ($1::BOOLEAN IS NULL OR p.featured = $1)
               AND ($2::TEXT IS NULL OR p.status = $2)
               AND ($3::BIGINT IS NULL OR p.product_type_id = $3)
             ORDER BY {ORDER}
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(filter.featured)
            .bind(&filter.status)
            .bind(filter.product_type)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Featured projects for the home page.
    pub async fn list_featured(pool: &PgPool, limit: i64) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("{SELECT} WHERE p.featured = true ORDER BY {ORDER} LIMIT $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let slug = match &input.title {
            Some(title) => Some(resolve_slug(pool, SlugTable::Projects, title, Some(id)).await?),
            None => None,
        };
        let updated: Option<DbId> = sqlx::query_scalar(
            "UPDATE projects SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                client = COALESCE($5, client),
                location = COALESCE($6, location),
                completed_date = COALESCE($7, completed_date),
                status = COALESCE($8, status),
                featured = COALESCE($9, featured),
                product_type_id = COALESCE($10, product_type_id),
                area_size = COALESCE($11, area_size),
                testimonial = COALESCE($12, testimonial)
             WHERE id = $1
             RETURNING id",
        )
        .bind(id)
        .bind(input.title.as_deref().map(str::trim))
        .bind(&slug)
        .bind(&input.description)
        .bind(&input.client)
        .bind(&input.location)
        .bind(input.completed_date)
        .bind(&input.status)
        .bind(input.featured)
        .bind(input.product_type)
        .bind(&input.area_size)
        .bind(&input.testimonial)
        .fetch_optional(pool)
        .await?;

        match updated {
            Some(id) => Self::find_by_id(pool, id).await,
            None => Ok(None),
        }
    }

    /// Replace the set of tiles used in a project.
    ///
    /// Runs as one transaction; callers validate `tile_ids` beforehand.
    pub async fn replace_tiles(
        pool: &PgPool,
        project_id: DbId,
        tile_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM project_tiles WHERE project_id = $1")
            .bind(project_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO project_tiles (project_id, tile_id)
             SELECT $1, tile_id FROM UNNEST($2::BIGINT[]) AS ids(tile_id)
             ON CONFLICT DO NOTHING",
        )
        .bind(project_id)
        .bind(tile_ids)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Delete a project. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
