//! Route definitions for `/tiles` and `/tile-images`.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::tile;
use crate::state::AppState;

/// Routes mounted at `/tiles`.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> create (staff)
/// GET    /{id}          -> get_by_id
/// PUT    /{id}          -> update (staff)
/// DELETE /{id}          -> delete (staff)
/// GET    /{id}/images   -> list_images
/// POST   /{id}/images   -> add_image (staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tile::list).post(tile::create))
        .route(
            "/{id}",
            get(tile::get_by_id).put(tile::update).delete(tile::delete),
        )
        .route("/{id}/images", get(tile::list_images).post(tile::add_image))
}

/// Routes mounted at `/tile-images`.
///
/// ```text
/// PUT    /{id}   -> update_image (staff)
/// DELETE /{id}   -> delete_image (staff)
/// ```
pub fn image_router() -> Router<AppState> {
    Router::new().route("/{id}", put(tile::update_image).delete(tile::delete_image))
}
