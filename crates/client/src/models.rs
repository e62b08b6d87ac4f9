//! Response and request shapes as seen by API consumers.
//!
//! Unknown fields are ignored, and detail-only collections default to empty
//! so the same type decodes both list items and detail views.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tola_core::types::DbId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: DbId,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub is_staff: bool,
}

/// Body of `POST /auth/login` and `POST /auth/refresh`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Body of `POST /auth/admin-login`.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminToken {
    pub token: String,
    pub user: UserInfo,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ProductType {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub icon_name: Option<String>,
    pub display_order: i32,
    pub active: bool,
    pub show_in_navbar: bool,
    #[serde(default)]
    pub categories_count: i64,
    #[serde(default)]
    pub tiles_count: i64,
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub product_type: Option<DbId>,
    pub product_type_name: Option<String>,
    pub order: i32,
    pub active: bool,
    #[serde(default)]
    pub tiles_count: i64,
    #[serde(default)]
    pub tiles: Vec<Tile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tile {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    pub category: DbId,
    pub category_name: Option<String>,
    pub product_type: Option<DbId>,
    pub price: Option<f64>,
    pub size: Option<String>,
    pub material: Option<String>,
    pub in_stock: bool,
    pub featured: bool,
    pub sku: String,
    pub primary_image: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub images: Vec<TileImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TileImage {
    pub id: DbId,
    pub image: String,
    pub image_url: String,
    pub thumbnail_url: String,
    pub caption: Option<String>,
    pub is_primary: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub location: String,
    pub completed_date: Option<NaiveDate>,
    pub status: String,
    pub status_display: String,
    pub featured: bool,
    pub product_type: Option<DbId>,
    pub area_size: Option<String>,
    pub primary_image: Option<String>,
    #[serde(default)]
    pub images: Vec<ProjectImage>,
    #[serde(default)]
    pub tiles_used: Vec<Tile>,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectImage {
    pub id: DbId,
    pub image: String,
    pub image_url: String,
    pub caption: Option<String>,
    pub is_primary: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Testimonial {
    pub id: DbId,
    pub customer_name: String,
    pub location: Option<String>,
    pub testimonial: String,
    pub project: Option<DbId>,
    pub rating: i16,
    pub date: NaiveDate,
    pub image_url: Option<String>,
    pub approved: bool,
}

/// Query for `GET /tiles`. Unset fields are not sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TileFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
}

/// Query for `GET /projects`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
}

// ---------------------------------------------------------------------------
// Forms and aggregates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Contact {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub responded: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Subscriber {
    pub id: DbId,
    pub email: String,
    pub name: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HomePage {
    pub featured_tiles: Vec<Tile>,
    pub featured_projects: Vec<Project>,
    pub testimonials: Vec<Testimonial>,
    pub product_types: Vec<ProductType>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DashboardStats {
    pub tiles: i64,
    pub categories: i64,
    pub projects: i64,
    pub product_types: i64,
    pub unresponded_contacts: i64,
    pub active_subscribers: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_filter_only_serializes_set_fields() {
        let filter = TileFilter {
            featured: Some(true),
            search: Some("marble".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&filter).unwrap();
        assert_eq!(value, serde_json::json!({"featured": true, "search": "marble"}));
    }

    #[test]
    fn list_item_decodes_without_detail_collections() {
        let tile: Tile = serde_json::from_value(serde_json::json!({
            "id": 1, "title": "Onyx", "slug": "onyx", "description": "",
            "category": 2, "category_name": "Stone", "product_type": null,
            "price": 10.5, "size": null, "material": null, "in_stock": true,
            "featured": false, "sku": "TL-ABCDEFGH", "primary_image": null,
            "created_at": "2026-01-01T00:00:00Z", "images_count": 0,
        }))
        .unwrap();
        assert!(tile.images.is_empty());
        assert_eq!(tile.price, Some(10.5));
    }
}
