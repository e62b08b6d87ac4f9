//! Route definitions for the `/product-types` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::product_type;
use crate::state::AppState;

/// Routes mounted at `/product-types`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create (staff)
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update (staff)
/// DELETE /{id}   -> delete (staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(product_type::list).post(product_type::create))
        .route(
            "/{id}",
            get(product_type::get_by_id)
                .put(product_type::update)
                .delete(product_type::delete),
        )
}
