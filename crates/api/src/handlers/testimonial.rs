//! Handlers for the `/testimonials` resource.
//!
//! Anyone may submit a testimonial, but it stays hidden until staff approve it.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tola_core::pagination::{clamp_limit, DEFAULT_LIMIT, MAX_LIMIT};
use tola_core::types::DbId;
use tola_core::validation::{
    validate_optional_length, validate_rating, validate_required, MAX_SHORT_TEXT_LENGTH,
    MAX_TITLE_LENGTH,
};
use tola_db::models::testimonial::{CreateTestimonial, TestimonialFilter, UpdateTestimonial};
use tola_db::repositories::TestimonialRepo;

use crate::error::{not_found, AppResult};
use crate::middleware::auth::MaybeUser;
use crate::middleware::rbac::RequireStaff;
use crate::response::{views, TestimonialView};
use crate::state::AppState;

/// Longest accepted testimonial body.
const MAX_TESTIMONIAL_LENGTH: usize = 5000;

/// GET /api/testimonials
///
/// Staff see everything and may filter by `approved`; everyone else sees
/// approved testimonials only.
pub async fn list(
    State(state): State<AppState>,
    caller: MaybeUser,
    Query(mut filter): Query<TestimonialFilter>,
) -> AppResult<Json<Vec<TestimonialView>>> {
    if !caller.is_staff() {
        filter.approved = Some(true);
    }
    let limit = clamp_limit(filter.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let rows = TestimonialRepo::list(&state.pool, &filter, limit).await?;
    Ok(Json(views(&state, rows, TestimonialView::new)))
}

/// POST /api/testimonials
///
/// Public submissions are always stored unapproved.
pub async fn create(
    State(state): State<AppState>,
    caller: MaybeUser,
    Json(input): Json<CreateTestimonial>,
) -> AppResult<(StatusCode, Json<TestimonialView>)> {
    validate_required("Customer name", &input.customer_name, MAX_TITLE_LENGTH)?;
    validate_required("Testimonial", &input.testimonial, MAX_TESTIMONIAL_LENGTH)?;
    validate_optional_length("Location", input.location.as_deref(), MAX_SHORT_TEXT_LENGTH)?;
    if let Some(rating) = input.rating {
        validate_rating(rating)?;
    }

    let approved = caller.is_staff() && input.approved.unwrap_or(false);
    let testimonial = TestimonialRepo::create(&state.pool, &input, approved).await?;
    tracing::info!(testimonial_id = testimonial.id, approved, "Testimonial submitted");
    Ok((
        StatusCode::CREATED,
        Json(TestimonialView::new(&state, testimonial)),
    ))
}

/// GET /api/testimonials/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    caller: MaybeUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<TestimonialView>> {
    let testimonial = TestimonialRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|t| t.approved || caller.is_staff())
        .ok_or(not_found("Testimonial", id))?;
    Ok(Json(TestimonialView::new(&state, testimonial)))
}

/// PUT /api/testimonials/{id}
pub async fn update(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTestimonial>,
) -> AppResult<Json<TestimonialView>> {
    if let Some(name) = &input.customer_name {
        validate_required("Customer name", name, MAX_TITLE_LENGTH)?;
    }
    if let Some(body) = &input.testimonial {
        validate_required("Testimonial", body, MAX_TESTIMONIAL_LENGTH)?;
    }
    validate_optional_length("Location", input.location.as_deref(), MAX_SHORT_TEXT_LENGTH)?;
    if let Some(rating) = input.rating {
        validate_rating(rating)?;
    }
    let testimonial = TestimonialRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(not_found("Testimonial", id))?;
    Ok(Json(TestimonialView::new(&state, testimonial)))
}

/// DELETE /api/testimonials/{id}
pub async fn delete(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if TestimonialRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Testimonial", id))
    }
}
