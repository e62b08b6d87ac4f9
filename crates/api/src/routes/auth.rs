//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{auth, proxy};
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /login            -> login
/// POST /admin-login      -> admin_login (staff only)
/// POST /refresh          -> refresh
/// POST /logout           -> logout (requires auth)
/// GET  /user             -> current_user (requires auth)
/// POST /register         -> register
/// POST /change-password  -> change_password (requires auth)
/// POST /proxy-login      -> proxy_login
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/admin-login", post(auth::admin_login))
        .route("/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout))
        .route("/user", get(auth::current_user))
        .route("/register", post(auth::register))
        .route("/change-password", post(auth::change_password))
        .route("/proxy-login", post(proxy::proxy_login))
}
