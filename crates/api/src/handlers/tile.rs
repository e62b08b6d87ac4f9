//! Handlers for the `/tiles` resource and tile gallery images.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tola_core::error::CoreError;
use tola_core::pagination::resolve_window;
use tola_core::types::DbId;
use tola_core::validation::{
    validate_optional_length, validate_price, validate_required, MAX_SHORT_TEXT_LENGTH,
    MAX_TITLE_LENGTH,
};
use tola_db::models::tile::{
    CreateTile, CreateTileImage, TileFilter, TileOrdering, UpdateTile, UpdateTileImage,
};
use tola_db::repositories::{TileImageRepo, TileRepo};

use crate::error::{not_found, AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::{views, TileImageView, TileView};
use crate::state::AppState;

/// Detail view: the tile with its gallery.
#[derive(Debug, Serialize)]
pub struct TileDetail {
    #[serde(flatten)]
    pub tile: TileView,
    pub images: Vec<TileImageView>,
}

/// Parse `?ordering=`, rejecting unknown values.
fn parse_ordering(value: Option<&str>) -> AppResult<TileOrdering> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(TileOrdering::default()),
        Some(v) => TileOrdering::parse(v).ok_or_else(|| {
            AppError::BadRequest(format!(
                "Invalid ordering '{v}'. Valid values: created_at, -created_at, price, -price, title, -title"
            ))
        }),
    }
}

/// GET /api/tiles
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<TileFilter>,
) -> AppResult<Json<Vec<TileView>>> {
    let ordering = parse_ordering(filter.ordering.as_deref())?;
    let (limit, offset) = resolve_window(filter.limit, filter.offset, filter.page, filter.page_size);
    let rows = TileRepo::list(&state.pool, &filter, ordering, limit, offset).await?;
    Ok(Json(views(&state, rows, TileView::new)))
}

/// POST /api/tiles
pub async fn create(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateTile>,
) -> AppResult<(StatusCode, Json<TileView>)> {
    validate_required("Title", &input.title, MAX_TITLE_LENGTH)?;
    validate_price(input.price)?;
    validate_optional_length("Size", input.size.as_deref(), MAX_SHORT_TEXT_LENGTH)?;
    validate_optional_length("Material", input.material.as_deref(), MAX_SHORT_TEXT_LENGTH)?;

    let tile = TileRepo::create(&state.pool, &input).await?;
    tracing::info!(tile_id = tile.id, sku = %tile.sku, "Tile created");
    Ok((StatusCode::CREATED, Json(TileView::new(&state, tile))))
}

/// GET /api/tiles/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<TileDetail>> {
    let tile = TileRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found("Tile", id))?;
    let images = TileImageRepo::list_by_tile(&state.pool, id).await?;
    Ok(Json(TileDetail {
        tile: TileView::new(&state, tile),
        images: views(&state, images, TileImageView::new),
    }))
}

/// PUT /api/tiles/{id}
pub async fn update(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTile>,
) -> AppResult<Json<TileView>> {
    if let Some(title) = &input.title {
        validate_required("Title", title, MAX_TITLE_LENGTH)?;
    }
    validate_price(input.price)?;
    validate_optional_length("Size", input.size.as_deref(), MAX_SHORT_TEXT_LENGTH)?;
    validate_optional_length("Material", input.material.as_deref(), MAX_SHORT_TEXT_LENGTH)?;

    let tile = TileRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(not_found("Tile", id))?;
    Ok(Json(TileView::new(&state, tile)))
}

/// DELETE /api/tiles/{id}
pub async fn delete(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if TileRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Tile", id))
    }
}

// ---------------------------------------------------------------------------
// Gallery images
// ---------------------------------------------------------------------------

fn validate_image_path(path: &str) -> AppResult<()> {
    if path.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Image path must not be empty".into(),
        )));
    }
    Ok(())
}

/// GET /api/tiles/{id}/images
pub async fn list_images(
    State(state): State<AppState>,
    Path(tile_id): Path<DbId>,
) -> AppResult<Json<Vec<TileImageView>>> {
    TileRepo::find_by_id(&state.pool, tile_id)
        .await?
        .ok_or(not_found("Tile", tile_id))?;
    let images = TileImageRepo::list_by_tile(&state.pool, tile_id).await?;
    Ok(Json(views(&state, images, TileImageView::new)))
}

/// POST /api/tiles/{id}/images
pub async fn add_image(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(tile_id): Path<DbId>,
    Json(input): Json<CreateTileImage>,
) -> AppResult<(StatusCode, Json<TileImageView>)> {
    validate_image_path(&input.image)?;
    TileRepo::find_by_id(&state.pool, tile_id)
        .await?
        .ok_or(not_found("Tile", tile_id))?;
    let image = TileImageRepo::create(&state.pool, tile_id, &input).await?;
    Ok((StatusCode::CREATED, Json(TileImageView::new(&state, image))))
}

/// PUT /api/tile-images/{id}
pub async fn update_image(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTileImage>,
) -> AppResult<Json<TileImageView>> {
    let image = TileImageRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(not_found("TileImage", id))?;
    Ok(Json(TileImageView::new(&state, image)))
}

/// DELETE /api/tile-images/{id}
pub async fn delete_image(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if TileImageRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("TileImage", id))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn ordering_defaults_to_newest_first() {
        assert_matches!(parse_ordering(None), Ok(TileOrdering::CreatedDesc));
        assert_matches!(parse_ordering(Some("")), Ok(TileOrdering::CreatedDesc));
    }

    #[test]
    fn unknown_ordering_is_bad_request() {
        assert_matches!(parse_ordering(Some("rating")), Err(AppError::BadRequest(_)));
        assert_matches!(parse_ordering(Some("-price")), Ok(TileOrdering::PriceDesc));
    }
}
