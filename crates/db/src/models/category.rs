//! Tile category model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tola_core::types::{DbId, Timestamp};

/// A category row with its product type name and tile count.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub product_type: Option<DbId>,
    pub product_type_name: Option<String>,
    pub order: i32,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub tiles_count: i64,
}

/// DTO for creating a category. The slug is derived from `name`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub product_type: Option<DbId>,
    pub order: Option<i32>,
    pub active: Option<bool>,
}

/// DTO for updating a category. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub product_type: Option<DbId>,
    pub order: Option<i32>,
    pub active: Option<bool>,
}

/// List filters (`?product_type=&active=`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryFilter {
    pub product_type: Option<DbId>,
    pub active: Option<bool>,
}
