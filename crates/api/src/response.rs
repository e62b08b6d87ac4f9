//! Response shapes that decorate rows with computed fields.
//!
//! Image columns hold media-relative paths. Every view here adds the
//! absolute URL(s) next to the stored path, built from the configured
//! public base URL and media prefix. Lists are returned as plain JSON arrays.

use serde::Serialize;
use tola_core::project_status::status_display;
use tola_db::models::category::Category;
use tola_db::models::product_type::ProductType;
use tola_db::models::project::{Project, ProjectImage};
use tola_db::models::team_member::TeamMember;
use tola_db::models::testimonial::Testimonial;
use tola_db::models::tile::{Tile, TileImage};

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProductTypeView {
    #[serde(flatten)]
    pub product_type: ProductType,
    pub image_url: Option<String>,
}

impl ProductTypeView {
    pub fn new(state: &AppState, product_type: ProductType) -> Self {
        let image_url = state.optional_media_url(product_type.image.as_deref());
        Self {
            product_type,
            image_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryView {
    #[serde(flatten)]
    pub category: Category,
    pub image_url: Option<String>,
}

impl CategoryView {
    pub fn new(state: &AppState, category: Category) -> Self {
        let image_url = state.optional_media_url(category.image.as_deref());
        Self {
            category,
            image_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TileView {
    #[serde(flatten)]
    pub tile: Tile,
    /// URL of the primary (or first) gallery image.
    pub primary_image: Option<String>,
}

impl TileView {
    pub fn new(state: &AppState, tile: Tile) -> Self {
        let primary_image = state.optional_media_url(tile.primary_image_path.as_deref());
        Self {
            tile,
            primary_image,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TileImageView {
    #[serde(flatten)]
    pub image: TileImage,
    pub image_url: String,
    /// Thumbnail URL, falling back to the full image.
    pub thumbnail_url: String,
}

impl TileImageView {
    pub fn new(state: &AppState, image: TileImage) -> Self {
        let image_url = state.media_url(&image.image);
        let thumbnail_url = state
            .optional_media_url(image.thumbnail.as_deref())
            .unwrap_or_else(|| image_url.clone());
        Self {
            image,
            image_url,
            thumbnail_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectView {
    #[serde(flatten)]
    pub project: Project,
    pub status_display: &'static str,
    pub primary_image: Option<String>,
}

impl ProjectView {
    pub fn new(state: &AppState, project: Project) -> Self {
        let primary_image = state.optional_media_url(project.primary_image_path.as_deref());
        Self {
            status_display: status_display(&project.status),
            primary_image,
            project,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectImageView {
    #[serde(flatten)]
    pub image: ProjectImage,
    pub image_url: String,
}

impl ProjectImageView {
    pub fn new(state: &AppState, image: ProjectImage) -> Self {
        let image_url = state.media_url(&image.image);
        Self { image, image_url }
    }
}

#[derive(Debug, Serialize)]
pub struct TestimonialView {
    #[serde(flatten)]
    pub testimonial: Testimonial,
    pub image_url: Option<String>,
}

impl TestimonialView {
    pub fn new(state: &AppState, testimonial: Testimonial) -> Self {
        let image_url = state.optional_media_url(testimonial.image.as_deref());
        Self {
            testimonial,
            image_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TeamMemberView {
    #[serde(flatten)]
    pub member: TeamMember,
    pub image_url: Option<String>,
}

impl TeamMemberView {
    pub fn new(state: &AppState, member: TeamMember) -> Self {
        let image_url = state.optional_media_url(member.image.as_deref());
        Self { member, image_url }
    }
}

/// Map a list of rows through a view constructor.
pub fn views<T, V>(state: &AppState, rows: Vec<T>, f: fn(&AppState, T) -> V) -> Vec<V> {
    rows.into_iter().map(|row| f(state, row)).collect()
}
