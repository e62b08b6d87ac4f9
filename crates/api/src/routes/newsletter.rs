//! Route definitions for the `/newsletter` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::newsletter;
use crate::state::AppState;

/// Routes mounted at `/newsletter`.
///
/// ```text
/// POST /subscribe     -> subscribe (public)
/// POST /unsubscribe   -> unsubscribe (public)
/// GET  /subscribers   -> list_subscribers (staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/subscribe", post(newsletter::subscribe))
        .route("/unsubscribe", post(newsletter::unsubscribe))
        .route("/subscribers", get(newsletter::list_subscribers))
}
