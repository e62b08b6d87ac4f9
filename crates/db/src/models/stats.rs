use serde::Serialize;
use sqlx::FromRow;

/// Row counts shown on the admin dashboard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DashboardStats {
    pub tiles: i64,
    pub categories: i64,
    pub projects: i64,
    pub product_types: i64,
    pub unresponded_contacts: i64,
    pub active_subscribers: i64,
}
