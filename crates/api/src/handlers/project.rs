//! Handlers for the `/projects` resource, its gallery, and used tiles.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tola_core::error::CoreError;
use tola_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use tola_core::project_status::validate_status;
use tola_core::types::DbId;
use tola_core::validation::{
    validate_max_length, validate_optional_length, validate_required, MAX_SHORT_TEXT_LENGTH,
    MAX_TITLE_LENGTH,
};
use tola_db::models::project::{
    CreateProject, CreateProjectImage, ProjectFilter, UpdateProject, UpdateProjectImage,
};
use tola_db::models::testimonial::TestimonialFilter;
use tola_db::repositories::{ProjectImageRepo, ProjectRepo, TestimonialRepo, TileRepo};

use crate::error::{not_found, AppError, AppResult};
use crate::middleware::auth::MaybeUser;
use crate::middleware::rbac::RequireStaff;
use crate::query::ProjectParam;
use crate::response::{views, ProjectImageView, ProjectView, TestimonialView, TileView};
use crate::state::AppState;

/// Detail view: the project with gallery, tiles used, and testimonials.
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: ProjectView,
    pub images: Vec<ProjectImageView>,
    pub tiles_used: Vec<TileView>,
    pub testimonials: Vec<TestimonialView>,
}

/// Body of `PUT /projects/{id}/tiles`.
#[derive(Debug, Deserialize)]
pub struct SetTilesRequest {
    pub tile_ids: Vec<DbId>,
}

fn validate_fields(
    client: Option<&str>,
    location: Option<&str>,
    area_size: Option<&str>,
    status: Option<&str>,
) -> AppResult<()> {
    validate_optional_length("Client", client, MAX_TITLE_LENGTH)?;
    validate_optional_length("Location", location, MAX_TITLE_LENGTH)?;
    validate_optional_length("Area size", area_size, MAX_SHORT_TEXT_LENGTH)?;
    if let Some(status) = status {
        validate_status(status)?;
    }
    Ok(())
}

/// GET /api/projects
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<ProjectFilter>,
) -> AppResult<Json<Vec<ProjectView>>> {
    if let Some(status) = &filter.status {
        validate_status(status)?;
    }
    let limit = clamp_limit(filter.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(filter.offset);
    let rows = ProjectRepo::list(&state.pool, &filter, limit, offset).await?;
    Ok(Json(views(&state, rows, ProjectView::new)))
}

/// POST /api/projects
pub async fn create(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<ProjectView>)> {
    validate_required("Title", &input.title, MAX_TITLE_LENGTH)?;
    validate_max_length("Client", &input.client, MAX_TITLE_LENGTH)?;
    validate_fields(
        None,
        Some(&input.location),
        input.area_size.as_deref(),
        input.status.as_deref(),
    )?;
    let project = ProjectRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(ProjectView::new(&state, project))))
}

/// GET /api/projects/{id}
///
/// Anonymous callers only see approved testimonials.
pub async fn get_by_id(
    State(state): State<AppState>,
    caller: MaybeUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectDetail>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found("Project", id))?;

    let images = ProjectImageRepo::list(&state.pool, Some(id)).await?;
    let tiles = TileRepo::list_by_project(&state.pool, id).await?;
    let filter = TestimonialFilter {
        approved: if caller.is_staff() { None } else { Some(true) },
        project: Some(id),
        limit: None,
    };
    let testimonials = TestimonialRepo::list(&state.pool, &filter, MAX_LIMIT).await?;

    Ok(Json(ProjectDetail {
        project: ProjectView::new(&state, project),
        images: views(&state, images, ProjectImageView::new),
        tiles_used: views(&state, tiles, TileView::new),
        testimonials: views(&state, testimonials, TestimonialView::new),
    }))
}

/// PUT /api/projects/{id}
pub async fn update(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<ProjectView>> {
    if let Some(title) = &input.title {
        validate_required("Title", title, MAX_TITLE_LENGTH)?;
    }
    validate_fields(
        input.client.as_deref(),
        input.location.as_deref(),
        input.area_size.as_deref(),
        input.status.as_deref(),
    )?;
    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(not_found("Project", id))?;
    Ok(Json(ProjectView::new(&state, project)))
}

/// DELETE /api/projects/{id}
pub async fn delete(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ProjectRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Project", id))
    }
}

/// PUT /api/projects/{id}/tiles
///
/// Replace the tiles used in a project. Every id must exist.
pub async fn set_tiles(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetTilesRequest>,
) -> AppResult<Json<Vec<TileView>>> {
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found("Project", id))?;

    let missing = TileRepo::find_missing_ids(&state.pool, &input.tile_ids).await?;
    if !missing.is_empty() {
        let ids: Vec<String> = missing.iter().map(ToString::to_string).collect();
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown tile ids: {}",
            ids.join(", ")
        ))));
    }

    ProjectRepo::replace_tiles(&state.pool, id, &input.tile_ids).await?;
    let tiles = TileRepo::list_by_project(&state.pool, id).await?;
    Ok(Json(views(&state, tiles, TileView::new)))
}

// ---------------------------------------------------------------------------
// Gallery images
// ---------------------------------------------------------------------------

/// GET /api/projects/{id}/images
pub async fn list_images(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<ProjectImageView>>> {
    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(not_found("Project", project_id))?;
    let images = ProjectImageRepo::list(&state.pool, Some(project_id)).await?;
    Ok(Json(views(&state, images, ProjectImageView::new)))
}

/// POST /api/projects/{id}/images
pub async fn add_image(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateProjectImage>,
) -> AppResult<(StatusCode, Json<ProjectImageView>)> {
    if input.image.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Image path must not be empty".into(),
        )));
    }
    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(not_found("Project", project_id))?;
    let image = ProjectImageRepo::create(&state.pool, project_id, &input).await?;
    Ok((StatusCode::CREATED, Json(ProjectImageView::new(&state, image))))
}

/// GET /api/project-images
pub async fn list_all_images(
    State(state): State<AppState>,
    Query(params): Query<ProjectParam>,
) -> AppResult<Json<Vec<ProjectImageView>>> {
    let images = ProjectImageRepo::list(&state.pool, params.project).await?;
    Ok(Json(views(&state, images, ProjectImageView::new)))
}

/// GET /api/project-images/{id}
pub async fn get_image(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectImageView>> {
    let image = ProjectImageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found("ProjectImage", id))?;
    Ok(Json(ProjectImageView::new(&state, image)))
}

/// PUT /api/project-images/{id}
pub async fn update_image(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProjectImage>,
) -> AppResult<Json<ProjectImageView>> {
    let image = ProjectImageRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(not_found("ProjectImage", id))?;
    Ok(Json(ProjectImageView::new(&state, image)))
}

/// DELETE /api/project-images/{id}
pub async fn delete_image(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ProjectImageRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("ProjectImage", id))
    }
}
