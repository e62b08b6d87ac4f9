//! Tile and tile gallery image models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tola_core::types::{DbId, Timestamp};

/// A tile row joined with its category / product type names and gallery stats.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tile {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub category: DbId,
    pub category_name: Option<String>,
    pub product_type: Option<DbId>,
    pub product_type_name: Option<String>,
    pub price: Option<f64>,
    pub size: Option<String>,
    pub material: Option<String>,
    pub in_stock: bool,
    pub featured: bool,
    pub sku: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Media path of the primary (or first) gallery image.
    #[serde(skip)]
    pub primary_image_path: Option<String>,
    pub images_count: i64,
}

/// DTO for creating a tile. Slug and SKU are generated.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTile {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: DbId,
    pub product_type: Option<DbId>,
    pub price: Option<f64>,
    pub size: Option<String>,
    pub material: Option<String>,
    pub in_stock: Option<bool>,
    pub featured: Option<bool>,
}

/// DTO for updating a tile. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTile {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<DbId>,
    pub product_type: Option<DbId>,
    pub price: Option<f64>,
    pub size: Option<String>,
    pub material: Option<String>,
    pub in_stock: Option<bool>,
    pub featured: Option<bool>,
}

/// Query-string filters accepted by `GET /tiles`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TileFilter {
    pub category: Option<DbId>,
    pub product_type: Option<DbId>,
    pub featured: Option<bool>,
    pub in_stock: Option<bool>,
    pub material: Option<String>,
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub ordering: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Sort orders accepted by `?ordering=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TileOrdering {
    CreatedAsc,
    #[default]
    CreatedDesc,
    PriceAsc,
    PriceDesc,
    TitleAsc,
    TitleDesc,
}

impl TileOrdering {
    /// Parse a DRF-style ordering value (`price`, `-price`, ...).
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "created_at" => Some(Self::CreatedAsc),
            "-created_at" => Some(Self::CreatedDesc),
            "price" => Some(Self::PriceAsc),
            "-price" => Some(Self::PriceDesc),
            "title" => Some(Self::TitleAsc),
            "-title" => Some(Self::TitleDesc),
            _ => None,
        }
    }

    /// `ORDER BY` clause body. `t.id` breaks ties so paging is stable.
    pub fn sql(self) -> &'static str {
        match self {
            Self::CreatedAsc => "t.created_at ASC, t.id ASC",
            Self::CreatedDesc => "t.created_at DESC, t.id DESC",
            Self::PriceAsc => "t.price ASC NULLS LAST, t.id ASC",
            Self::PriceDesc => "t.price DESC NULLS LAST, t.id DESC",
            Self::TitleAsc => "t.title ASC, t.id ASC",
            Self::TitleDesc => "t.title DESC, t.id DESC",
        }
    }
}

/// A gallery image attached to a tile.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TileImage {
    pub id: DbId,
    pub tile: DbId,
    pub image: String,
    pub thumbnail: Option<String>,
    pub caption: Option<String>,
    pub is_primary: bool,
    pub created_at: Timestamp,
}

/// DTO for attaching an (already uploaded) image to a tile.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTileImage {
    pub image: String,
    pub thumbnail: Option<String>,
    pub caption: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

/// DTO for updating a tile image.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTileImage {
    pub thumbnail: Option<String>,
    pub caption: Option<String>,
    pub is_primary: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_parses_known_values() {
        assert_eq!(TileOrdering::parse("-price"), Some(TileOrdering::PriceDesc));
        assert_eq!(TileOrdering::parse("title"), Some(TileOrdering::TitleAsc));
        assert_eq!(TileOrdering::parse("popularity"), None);
        assert_eq!(TileOrdering::default(), TileOrdering::CreatedDesc);
    }
}
