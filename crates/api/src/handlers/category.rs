//! Handlers for the `/categories` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tola_core::types::DbId;
use tola_core::validation::{validate_required, MAX_TITLE_LENGTH};
use tola_db::models::category::{CategoryFilter, CreateCategory, UpdateCategory};
use tola_db::repositories::{CategoryRepo, TileRepo};

use crate::error::{not_found, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::{views, CategoryView, TileView};
use crate::state::AppState;

/// Detail view: the category with its tiles.
#[derive(Debug, Serialize)]
pub struct CategoryDetail {
    #[serde(flatten)]
    pub category: CategoryView,
    pub tiles: Vec<TileView>,
}

/// GET /api/categories
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<CategoryFilter>,
) -> AppResult<Json<Vec<CategoryView>>> {
    let rows = CategoryRepo::list(&state.pool, &filter).await?;
    Ok(Json(views(&state, rows, CategoryView::new)))
}

/// POST /api/categories
pub async fn create(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<CategoryView>)> {
    validate_required("Name", &input.name, MAX_TITLE_LENGTH)?;
    let category = CategoryRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(CategoryView::new(&state, category))))
}

/// GET /api/categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<CategoryDetail>> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found("Category", id))?;
    let tiles = TileRepo::list_by_category(&state.pool, id).await?;
    Ok(Json(CategoryDetail {
        category: CategoryView::new(&state, category),
        tiles: views(&state, tiles, TileView::new),
    }))
}

/// PUT /api/categories/{id}
pub async fn update(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<Json<CategoryView>> {
    if let Some(name) = &input.name {
        validate_required("Name", name, MAX_TITLE_LENGTH)?;
    }
    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(not_found("Category", id))?;
    Ok(Json(CategoryView::new(&state, category)))
}

/// DELETE /api/categories/{id}
pub async fn delete(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if CategoryRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Category", id))
    }
}
