//! Project showcase models: projects, their gallery images, and used tiles.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tola_core::types::{DbId, Timestamp};

/// A project row with gallery and testimonial stats.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub client: String,
    pub location: String,
    pub completed_date: Option<NaiveDate>,
    pub status: String,
    pub featured: bool,
    pub product_type: Option<DbId>,
    pub product_type_name: Option<String>,
    pub area_size: Option<String>,
    pub testimonial: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Media path of the primary (or first) gallery image.
    #[serde(skip)]
    pub primary_image_path: Option<String>,
    pub images_count: i64,
    pub testimonials_count: i64,
}

/// DTO for creating a project. The slug is derived from `title`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub location: String,
    pub completed_date: Option<NaiveDate>,
    /// Defaults to `completed` if omitted.
    pub status: Option<String>,
    pub featured: Option<bool>,
    pub product_type: Option<DbId>,
    pub area_size: Option<String>,
    pub testimonial: Option<String>,
}

/// DTO for updating a project. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub client: Option<String>,
    pub location: Option<String>,
    pub completed_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub featured: Option<bool>,
    pub product_type: Option<DbId>,
    pub area_size: Option<String>,
    pub testimonial: Option<String>,
}

/// List filters (`?featured=&status=&product_type=`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectFilter {
    pub featured: Option<bool>,
    pub status: Option<String>,
    pub product_type: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// A gallery image attached to a project.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectImage {
    pub id: DbId,
    pub project: DbId,
    pub image: String,
    pub caption: Option<String>,
    pub is_primary: bool,
    pub created_at: Timestamp,
}

/// DTO for attaching an (already uploaded) image to a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectImage {
    pub image: String,
    pub caption: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

/// DTO for updating a project image.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProjectImage {
    pub caption: Option<String>,
    pub is_primary: Option<bool>,
}
