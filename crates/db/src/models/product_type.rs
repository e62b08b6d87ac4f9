//! Product type model (top-level catalog grouping shown in the navbar).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tola_core::types::{DbId, Timestamp};

/// A product type row with its related-row counts.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductType {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub icon_name: Option<String>,
    pub display_order: i32,
    pub active: bool,
    pub show_in_navbar: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub tiles_count: i64,
    pub categories_count: i64,
}

/// DTO for creating a product type. The slug is derived from `name`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductType {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub icon_name: Option<String>,
    pub display_order: Option<i32>,
    pub active: Option<bool>,
    pub show_in_navbar: Option<bool>,
}

/// DTO for updating a product type. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProductType {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub icon_name: Option<String>,
    pub display_order: Option<i32>,
    pub active: Option<bool>,
    pub show_in_navbar: Option<bool>,
}

/// List filters (`?active=&show_in_navbar=`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductTypeFilter {
    pub active: Option<bool>,
    pub show_in_navbar: Option<bool>,
}
