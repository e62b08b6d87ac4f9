//! Route definitions for the `/team` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::team;
use crate::state::AppState;

/// Routes mounted at `/team`.
///
/// ```text
/// GET    /       -> list (?include_inactive= for staff)
/// POST   /       -> create (staff)
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update (staff)
/// DELETE /{id}   -> delete (staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(team::list).post(team::create))
        .route(
            "/{id}",
            get(team::get_by_id).put(team::update).delete(team::delete),
        )
}
