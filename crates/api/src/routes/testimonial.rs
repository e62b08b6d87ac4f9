//! Route definitions for the `/testimonials` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::testimonial;
use crate::state::AppState;

/// Routes mounted at `/testimonials`.
///
/// ```text
/// GET    /       -> list (approved only for anonymous callers)
/// POST   /       -> create (public, stored unapproved)
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update (staff)
/// DELETE /{id}   -> delete (staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(testimonial::list).post(testimonial::create))
        .route(
            "/{id}",
            get(testimonial::get_by_id)
                .put(testimonial::update)
                .delete(testimonial::delete),
        )
}
