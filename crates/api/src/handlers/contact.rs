//! Handlers for contact-form submissions.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tola_core::types::DbId;
use tola_core::validation::{
    normalize_email, validate_email, validate_optional_length, validate_required,
    MAX_SHORT_TEXT_LENGTH, MAX_TITLE_LENGTH,
};
use tola_db::models::contact::{Contact, ContactFilter, CreateContact, UpdateContact};
use tola_db::repositories::ContactRepo;

use crate::error::{not_found, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

/// Longest accepted message body.
const MAX_MESSAGE_LENGTH: usize = 5000;

/// POST /api/contacts (public)
pub async fn submit(
    State(state): State<AppState>,
    Json(mut input): Json<CreateContact>,
) -> AppResult<(StatusCode, Json<Contact>)> {
    validate_required("Name", &input.name, MAX_TITLE_LENGTH)?;
    validate_email(&input.email)?;
    validate_optional_length("Phone", input.phone.as_deref(), MAX_SHORT_TEXT_LENGTH)?;
    validate_required("Subject", &input.subject, MAX_TITLE_LENGTH)?;
    validate_required("Message", &input.message, MAX_MESSAGE_LENGTH)?;

    input.email = normalize_email(&input.email);
    let contact = ContactRepo::create(&state.pool, &input).await?;
    tracing::info!(contact_id = contact.id, "Contact form submitted");
    Ok((StatusCode::CREATED, Json(contact)))
}

/// GET /api/contacts
pub async fn list(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Query(filter): Query<ContactFilter>,
) -> AppResult<Json<Vec<Contact>>> {
    Ok(Json(ContactRepo::list(&state.pool, &filter).await?))
}

/// GET /api/contacts/{id}
pub async fn get_by_id(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Contact>> {
    let contact = ContactRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found("Contact", id))?;
    Ok(Json(contact))
}

/// PUT /api/contacts/{id}
pub async fn update(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateContact>,
) -> AppResult<Json<Contact>> {
    let contact = ContactRepo::set_responded(&state.pool, id, input.responded)
        .await?
        .ok_or(not_found("Contact", id))?;
    Ok(Json(contact))
}

/// DELETE /api/contacts/{id}
pub async fn delete(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ContactRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Contact", id))
    }
}
