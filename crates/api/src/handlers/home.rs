//! Public home page aggregate and the staff dashboard counters.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tola_db::models::product_type::ProductTypeFilter;
use tola_db::models::stats::DashboardStats;
use tola_db::models::testimonial::TestimonialFilter;
use tola_db::repositories::{ProductTypeRepo, ProjectRepo, StatsRepo, TestimonialRepo, TileRepo};

use crate::error::AppResult;
use crate::middleware::rbac::RequireStaff;
use crate::response::{views, ProductTypeView, ProjectView, TestimonialView, TileView};
use crate::state::AppState;

const HOME_FEATURED_TILES: i64 = 8;
const HOME_FEATURED_PROJECTS: i64 = 6;
const HOME_TESTIMONIALS: i64 = 6;

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub featured_tiles: Vec<TileView>,
    pub featured_projects: Vec<ProjectView>,
    pub testimonials: Vec<TestimonialView>,
    pub product_types: Vec<ProductTypeView>,
}

/// GET /api/home
pub async fn home(State(state): State<AppState>) -> AppResult<Json<HomeResponse>> {
    let tiles = TileRepo::list_featured(&state.pool, HOME_FEATURED_TILES).await?;
    let projects = ProjectRepo::list_featured(&state.pool, HOME_FEATURED_PROJECTS).await?;
    let testimonial_filter = TestimonialFilter {
        approved: Some(true),
        ..Default::default()
    };
    let testimonials =
        TestimonialRepo::list(&state.pool, &testimonial_filter, HOME_TESTIMONIALS).await?;
    let navbar_filter = ProductTypeFilter {
        active: Some(true),
        show_in_navbar: Some(true),
    };
    let product_types = ProductTypeRepo::list(&state.pool, &navbar_filter).await?;

    Ok(Json(HomeResponse {
        featured_tiles: views(&state, tiles, TileView::new),
        featured_projects: views(&state, projects, ProjectView::new),
        testimonials: views(&state, testimonials, TestimonialView::new),
        product_types: views(&state, product_types, ProductTypeView::new),
    }))
}

/// GET /api/dashboard/stats
pub async fn dashboard_stats(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DashboardStats>> {
    Ok(Json(StatsRepo::dashboard(&state.pool).await?))
}
