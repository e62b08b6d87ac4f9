//! Route definitions for `/projects` and `/project-images`.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::project;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> create (staff)
/// GET    /{id}          -> get_by_id
/// PUT    /{id}          -> update (staff)
/// DELETE /{id}          -> delete (staff)
/// PUT    /{id}/tiles    -> set_tiles (staff)
/// GET    /{id}/images   -> list_images
/// POST   /{id}/images   -> add_image (staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route("/{id}/tiles", put(project::set_tiles))
        .route(
            "/{id}/images",
            get(project::list_images).post(project::add_image),
        )
}

/// Routes mounted at `/project-images`.
///
/// ```text
/// GET    /       -> list_all_images (?project=)
/// GET    /{id}   -> get_image
/// PUT    /{id}   -> update_image (staff)
/// DELETE /{id}   -> delete_image (staff)
/// ```
pub fn image_router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list_all_images))
        .route(
            "/{id}",
            get(project::get_image)
                .put(project::update_image)
                .delete(project::delete_image),
        )
}
