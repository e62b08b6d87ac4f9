//! Credential extraction for Axum handlers.
//!
//! Two schemes are accepted in the `Authorization` header:
//!
//! - `Bearer <jwt>` -- short-lived access token from `/auth/login`.
//! - `Token <key>` -- static dashboard key from `/auth/admin-login`.
//!
//! Either way the user row is re-read so deactivated accounts and revoked
//! staff rights take effect immediately.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tola_core::api_token::hash_api_token;
use tola_core::error::CoreError;
use tola_core::types::DbId;
use tola_db::models::user::User;
use tola_db::repositories::{ApiTokenRepo, UserRepo};

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// How the caller authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    Jwt,
    ApiToken,
}

/// Authenticated, active user.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub username: String,
    pub is_staff: bool,
    pub credential: CredentialKind,
}

impl AuthUser {
    fn from_user(user: &User, credential: CredentialKind) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            is_staff: user.is_staff,
            credential,
        }
    }
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.into()))
}

/// Resolve the `Authorization` header, if any.
///
/// Returns `Ok(None)` when the header is absent, and an error when it is
/// present but not valid.
async fn resolve(parts: &Parts, state: &AppState) -> Result<Option<AuthUser>, AppError> {
    let Some(header) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let header = header
        .to_str()
        .map_err(|_| unauthorized("Invalid Authorization header"))?;

    if let Some(token) = header.strip_prefix("Bearer ") {
        let claims = validate_token(token.trim(), &state.config.jwt)
            .map_err(|_| unauthorized("Invalid or expired token"))?;
        let user = UserRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .ok_or_else(|| unauthorized("User no longer exists"))?;
        if !user.is_active {
            return Err(unauthorized("User account is disabled"));
        }
        return Ok(Some(AuthUser::from_user(&user, CredentialKind::Jwt)));
    }

    if let Some(key) = header.strip_prefix("Token ") {
        let user = ApiTokenRepo::find_user_by_key_hash(&state.pool, &hash_api_token(key))
            .await?
            .ok_or_else(|| unauthorized("Invalid token"))?;
        if !user.is_active {
            return Err(unauthorized("User account is disabled"));
        }
        return Ok(Some(AuthUser::from_user(&user, CredentialKind::ApiToken)));
    }

    Err(unauthorized(
        "Invalid Authorization format. Expected: Bearer <token> or Token <key>",
    ))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve(parts, state)
            .await?
            .ok_or_else(|| unauthorized("Authentication credentials were not provided"))
    }
}

/// The caller if credentials were sent, `None` for anonymous requests.
///
/// Invalid credentials are still rejected with 401.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<AuthUser>);

impl MaybeUser {
    pub fn is_staff(&self) -> bool {
        self.0.as_ref().is_some_and(|u| u.is_staff)
    }
}

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(resolve(parts, state).await?))
    }
}
