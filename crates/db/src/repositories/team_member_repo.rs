//! Repository for the `team_members` table.

use sqlx::PgPool;
use tola_core::types::DbId;

use crate::models::team_member::{CreateTeamMember, TeamMember, UpdateTeamMember};

const COLUMNS: &str = "id, name, position, bio, image, email, phone, display_order, active, \
                       created_at, updated_at";

pub struct TeamMemberRepo;

impl TeamMemberRepo {
    pub async fn create(pool: &PgPool, input: &CreateTeamMember) -> Result<TeamMember, sqlx::Error> {
        let query = format!(
            "INSERT INTO team_members (name, position, bio, image, email, phone, display_order, active)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 0), COALESCE($8, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(input.name.trim())
            .bind(&input.position)
            .bind(&input.bio)
            .bind(&input.image)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(input.display_order)
            .bind(input.active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TeamMember>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM team_members WHERE id = $1");
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List members by display order. Inactive members are skipped unless
    /// `include_inactive` is set.
    pub async fn list(pool: &PgPool, include_inactive: bool) -> Result<Vec<TeamMember>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM team_members
             WHERE $1 OR active
             ORDER BY display_order, name"
        );
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(include_inactive)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTeamMember,
    ) -> Result<Option<TeamMember>, sqlx::Error> {
        let query = format!(
            "UPDATE team_members SET
                name = COALESCE($2, name),
                position = COALESCE($3, position),
                bio = COALESCE($4, bio),
                image = COALESCE($5, image),
                email = COALESCE($6, email),
                phone = COALESCE($7, phone),
                display_order = COALESCE($8, display_order),
                active = COALESCE($9, active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.position)
            .bind(&input.bio)
            .bind(&input.image)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(input.display_order)
            .bind(input.active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM team_members WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
