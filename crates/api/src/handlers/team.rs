//! Handlers for the `/team` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tola_core::types::DbId;
use tola_core::validation::{
    validate_email, validate_optional_length, validate_required, MAX_SHORT_TEXT_LENGTH,
    MAX_TITLE_LENGTH,
};
use tola_db::models::team_member::{CreateTeamMember, UpdateTeamMember};
use tola_db::repositories::TeamMemberRepo;

use crate::error::{not_found, AppResult};
use crate::middleware::auth::MaybeUser;
use crate::middleware::rbac::RequireStaff;
use crate::query::IncludeInactiveParams;
use crate::response::{views, TeamMemberView};
use crate::state::AppState;

fn validate_contact(email: Option<&str>, phone: Option<&str>) -> AppResult<()> {
    if let Some(email) = email.filter(|e| !e.trim().is_empty()) {
        validate_email(email)?;
    }
    validate_optional_length("Phone", phone, MAX_SHORT_TEXT_LENGTH)?;
    Ok(())
}

/// GET /api/team
///
/// `include_inactive` is honoured for staff only.
pub async fn list(
    State(state): State<AppState>,
    caller: MaybeUser,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<Json<Vec<TeamMemberView>>> {
    let include_inactive = params.include_inactive && caller.is_staff();
    let rows = TeamMemberRepo::list(&state.pool, include_inactive).await?;
    Ok(Json(views(&state, rows, TeamMemberView::new)))
}

/// POST /api/team
pub async fn create(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateTeamMember>,
) -> AppResult<(StatusCode, Json<TeamMemberView>)> {
    validate_required("Name", &input.name, MAX_TITLE_LENGTH)?;
    validate_optional_length("Position", Some(&input.position), MAX_TITLE_LENGTH)?;
    validate_contact(input.email.as_deref(), input.phone.as_deref())?;
    let member = TeamMemberRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(TeamMemberView::new(&state, member))))
}

/// GET /api/team/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    caller: MaybeUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<TeamMemberView>> {
    let member = TeamMemberRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|m| m.active || caller.is_staff())
        .ok_or(not_found("TeamMember", id))?;
    Ok(Json(TeamMemberView::new(&state, member)))
}

/// PUT /api/team/{id}
pub async fn update(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTeamMember>,
) -> AppResult<Json<TeamMemberView>> {
    if let Some(name) = &input.name {
        validate_required("Name", name, MAX_TITLE_LENGTH)?;
    }
    validate_optional_length("Position", input.position.as_deref(), MAX_TITLE_LENGTH)?;
    validate_contact(input.email.as_deref(), input.phone.as_deref())?;
    let member = TeamMemberRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(not_found("TeamMember", id))?;
    Ok(Json(TeamMemberView::new(&state, member)))
}

/// DELETE /api/team/{id}
pub async fn delete(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if TeamMemberRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("TeamMember", id))
    }
}
