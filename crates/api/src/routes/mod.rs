pub mod auth;
pub mod category;
pub mod contact;
pub mod health;
pub mod newsletter;
pub mod product_type;
pub mod project;
pub mod team;
pub mod testimonial;
pub mod tile;
pub mod upload;

use axum::routing::get;
use axum::Router;

use crate::handlers::home;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Reads are public for catalog resources; writes require a staff JWT or
/// API token. Form submissions are public.
///
/// ```text
/// /auth/login, /auth/admin-login, /auth/refresh     credentials (public)
/// /auth/logout, /auth/user, /auth/change-password   requires auth
/// /auth/register, /auth/proxy-login                 public
///
/// /product-types, /product-types/{id}               catalog
/// /categories, /categories/{id}                     catalog
/// /tiles, /tiles/{id}, /tiles/{id}/images           catalog
/// /tile-images/{id}                                 update, delete (staff)
/// /projects, /projects/{id}                         catalog
/// /projects/{id}/tiles, /projects/{id}/images       tiles used, gallery
/// /project-images, /project-images/{id}             gallery
/// /testimonials, /testimonials/{id}                 public submit
/// /team, /team/{id}                                 catalog
///
/// /contacts, /contacts/{id}                         public submit, staff manage
/// /newsletter/subscribe, /newsletter/unsubscribe    public
/// /newsletter/subscribers                           staff
///
/// /home                                             featured aggregate (public)
/// /dashboard/stats                                  counters (staff)
/// /uploads?folder=                                  image upload (staff)
/// ```
pub fn api_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/product-types", product_type::router())
        .nest("/categories", category::router())
        .nest("/tiles", tile::router())
        .nest("/tile-images", tile::image_router())
        .nest("/projects", project::router())
        .nest("/project-images", project::image_router())
        .nest("/testimonials", testimonial::router())
        .nest("/team", team::router())
        .nest("/contacts", contact::router())
        .nest("/newsletter", newsletter::router())
        .nest("/uploads", upload::router(max_upload_bytes))
        .route("/home", get(home::home))
        .route("/dashboard/stats", get(home::dashboard_stats))
}
