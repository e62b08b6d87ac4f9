//! Handlers for the `/product-types` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tola_core::types::DbId;
use tola_core::validation::{validate_required, MAX_TITLE_LENGTH};
use tola_db::models::category::CategoryFilter;
use tola_db::models::product_type::{CreateProductType, ProductTypeFilter, UpdateProductType};
use tola_db::repositories::{CategoryRepo, ProductTypeRepo};

use crate::error::{not_found, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::{views, CategoryView, ProductTypeView};
use crate::state::AppState;

/// Detail view: the product type with its categories.
#[derive(Debug, Serialize)]
pub struct ProductTypeDetail {
    #[serde(flatten)]
    pub product_type: ProductTypeView,
    pub categories: Vec<CategoryView>,
}

/// GET /api/product-types
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<ProductTypeFilter>,
) -> AppResult<Json<Vec<ProductTypeView>>> {
    let rows = ProductTypeRepo::list(&state.pool, &filter).await?;
    Ok(Json(views(&state, rows, ProductTypeView::new)))
}

/// POST /api/product-types
pub async fn create(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateProductType>,
) -> AppResult<(StatusCode, Json<ProductTypeView>)> {
    validate_required("Name", &input.name, MAX_TITLE_LENGTH)?;
    let product_type = ProductTypeRepo::create(&state.pool, &input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ProductTypeView::new(&state, product_type)),
    ))
}

/// GET /api/product-types/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProductTypeDetail>> {
    let product_type = ProductTypeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found("ProductType", id))?;
    let filter = CategoryFilter {
        product_type: Some(id),
        active: None,
    };
    let categories = CategoryRepo::list(&state.pool, &filter).await?;
    Ok(Json(ProductTypeDetail {
        product_type: ProductTypeView::new(&state, product_type),
        categories: views(&state, categories, CategoryView::new),
    }))
}

/// PUT /api/product-types/{id}
pub async fn update(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProductType>,
) -> AppResult<Json<ProductTypeView>> {
    if let Some(name) = &input.name {
        validate_required("Name", name, MAX_TITLE_LENGTH)?;
    }
    let product_type = ProductTypeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(not_found("ProductType", id))?;
    Ok(Json(ProductTypeView::new(&state, product_type)))
}

/// DELETE /api/product-types/{id}
pub async fn delete(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ProductTypeRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("ProductType", id))
    }
}
