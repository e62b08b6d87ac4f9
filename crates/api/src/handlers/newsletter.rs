//! Handlers for newsletter subscriptions.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tola_core::validation::{
    normalize_email, validate_email, validate_optional_length, MAX_TITLE_LENGTH,
};
use tola_db::models::subscriber::{
    SubscribeOutcome, SubscribeRequest, Subscriber, SubscriberFilter,
};
use tola_db::repositories::SubscriberRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UnsubscribeRequest {
    pub email: String,
}

/// POST /api/newsletter/subscribe (public)
///
/// 201 for a new address, 200 when an existing one is reactivated.
pub async fn subscribe(
    State(state): State<AppState>,
    Json(input): Json<SubscribeRequest>,
) -> AppResult<(StatusCode, Json<Subscriber>)> {
    validate_email(&input.email)?;
    validate_optional_length("Name", input.name.as_deref(), MAX_TITLE_LENGTH)?;

    let email = normalize_email(&input.email);
    let name = input
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());

    match SubscriberRepo::subscribe(&state.pool, &email, name).await? {
        SubscribeOutcome::Created(subscriber) => {
            tracing::info!(subscriber_id = subscriber.id, "New newsletter subscriber");
            Ok((StatusCode::CREATED, Json(subscriber)))
        }
        SubscribeOutcome::Reactivated(subscriber) => Ok((StatusCode::OK, Json(subscriber))),
    }
}

/// POST /api/newsletter/unsubscribe (public)
pub async fn unsubscribe(
    State(state): State<AppState>,
    Json(input): Json<UnsubscribeRequest>,
) -> AppResult<StatusCode> {
    let email = normalize_email(&input.email);
    if SubscriberRepo::unsubscribe(&state.pool, &email).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("{email} is not subscribed")))
    }
}

/// GET /api/newsletter/subscribers
pub async fn list_subscribers(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Query(filter): Query<SubscriberFilter>,
) -> AppResult<Json<Vec<Subscriber>>> {
    Ok(Json(SubscriberRepo::list(&state.pool, &filter).await?))
}
