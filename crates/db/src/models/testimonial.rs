//! Customer testimonial model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tola_core::types::{DbId, Timestamp};

/// A testimonial row with the linked project's title.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Testimonial {
    pub id: DbId,
    pub customer_name: String,
    pub location: Option<String>,
    pub testimonial: String,
    pub project: Option<DbId>,
    pub project_title: Option<String>,
    pub rating: i16,
    pub date: NaiveDate,
    pub image: Option<String>,
    pub approved: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a testimonial.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTestimonial {
    pub customer_name: String,
    pub location: Option<String>,
    pub testimonial: String,
    pub project: Option<DbId>,
    /// Defaults to 5 if omitted.
    pub rating: Option<i16>,
    /// Defaults to today if omitted.
    pub date: Option<NaiveDate>,
    pub image: Option<String>,
    /// Ignored for anonymous submissions.
    pub approved: Option<bool>,
}

/// DTO for updating a testimonial. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTestimonial {
    pub customer_name: Option<String>,
    pub location: Option<String>,
    pub testimonial: Option<String>,
    pub project: Option<DbId>,
    pub rating: Option<i16>,
    pub date: Option<NaiveDate>,
    pub image: Option<String>,
    pub approved: Option<bool>,
}

/// List filters. `approved` is only honoured for staff callers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestimonialFilter {
    pub approved: Option<bool>,
    pub project: Option<DbId>,
    pub limit: Option<i64>,
}
