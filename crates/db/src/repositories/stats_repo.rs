//! Aggregate counts for the admin dashboard.

use sqlx::PgPool;

use crate::models::stats::DashboardStats;

pub struct StatsRepo;

impl StatsRepo {
    /// Fetch all dashboard counters in one round trip.
    pub async fn dashboard(pool: &PgPool) -> Result<DashboardStats, sqlx::Error> {
        sqlx::query_as::<_, DashboardStats>(
            "SELECT
                (SELECT COUNT(*) FROM tiles) AS tiles,
                (SELECT COUNT(*) FROM categories) AS categories,
                (SELECT COUNT(*) FROM projects) AS projects,
                (SELECT COUNT(*) FROM product_types) AS product_types,
                (SELECT COUNT(*) FROM contacts WHERE NOT responded) AS unresponded_contacts,
                (SELECT COUNT(*) FROM subscribers WHERE active) AS active_subscribers",
        )
        .fetch_one(pool)
        .await
    }
}
