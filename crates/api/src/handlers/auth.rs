//! Handlers for the `/auth` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tola_core::api_token::generate_api_token;
use tola_core::error::CoreError;
use tola_core::validation::{
    normalize_email, validate_email, validate_max_length, validate_new_password,
    validate_required, MAX_SHORT_TEXT_LENGTH,
};
use tola_db::models::session::{ClientMeta, NewRefreshSession};
use tola_db::models::user::{CreateUser, User, UserInfo};
use tola_db::repositories::{ApiTokenRepo, SessionRepo, UserRepo};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::origin::RequestOrigin;
use crate::state::AppState;

/// Maximum consecutive failed login attempts before locking the account.
pub const MAX_FAILED_ATTEMPTS: i32 = 5;

/// Duration in minutes to lock an account after exceeding failed attempts.
pub const LOCK_DURATION_MINS: i64 = 15;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login` and `POST /auth/admin-login`.
///
/// Fields default to empty so a missing field is reported as a 400 rather
/// than a JSON rejection.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh: String,
}

/// Successful JWT authentication returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access: String,
    pub refresh: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Successful admin login: a static dashboard token.
#[derive(Debug, Serialize)]
pub struct AdminLoginResponse {
    pub token: String,
    pub user: UserInfo,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password_confirm: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub old_password: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub new_password_confirm: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/login
///
/// Authenticate with username + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    RequestOrigin(origin): RequestOrigin,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = authenticate(&state, &input).await?;
    let response = create_auth_response(&state, &user, &origin).await?;
    tracing::info!(user_id = user.id, "User logged in");
    Ok(Json(response))
}

/// POST /api/auth/admin-login
///
/// Staff-only login that issues a static API token, replacing any previous one.
pub async fn admin_login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AdminLoginResponse>> {
    let user = authenticate(&state, &input).await?;

    if !user.is_staff {
        tracing::warn!(user_id = user.id, "Non-staff admin login attempt");
        return Err(AppError::Core(CoreError::Forbidden(
            "Access denied. Admin privileges required.".into(),
        )));
    }

    let token = generate_api_token();
    ApiTokenRepo::replace_for_user(&state.pool, user.id, &token.hash).await?;
    tracing::info!(user_id = user.id, "Issued admin API token");

    Ok(Json(AdminLoginResponse {
        token: token.plaintext,
        user: UserInfo::from(&user),
    }))
}

/// POST /api/auth/refresh
///
/// Exchange a valid refresh token for a new pair. A token is redeemable once;
/// when the same token is redeemed concurrently, all but one caller get 401.
pub async fn refresh(
    State(state): State<AppState>,
    RequestOrigin(origin): RequestOrigin,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    if input.refresh.trim().is_empty() {
        return Err(AppError::BadRequest("Refresh token is required".into()));
    }
    let token_hash = hash_refresh_token(&input.refresh);

    let session = SessionRepo::redeem(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;
    tracing::debug!(
        user_id = session.user_id,
        session_id = session.id,
        issued_to = ?session.ip_address,
        "Refresh session redeemed"
    );

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let response = create_auth_response(&state, &user, &origin).await?;
    Ok(Json(response))
}

/// POST /api/auth/logout
///
/// Revoke all refresh sessions and the API token of the caller. Returns 204.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    ApiTokenRepo::delete_for_user(&state.pool, auth_user.user_id).await?;
    tracing::info!(user_id = auth_user.user_id, revoked, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/auth/user
pub async fn current_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<UserInfo>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    Ok(Json(UserInfo::from(&user)))
}

/// POST /api/auth/register
///
/// Create a regular (non-staff) account.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserInfo>)> {
    let username = input.username.trim();
    validate_required("Username", username, MAX_SHORT_TEXT_LENGTH)?;
    validate_email(&input.email)?;
    validate_max_length("First name", &input.first_name, MAX_SHORT_TEXT_LENGTH)?;
    validate_max_length("Last name", &input.last_name, MAX_SHORT_TEXT_LENGTH)?;
    validate_new_password(&input.password, &input.password_confirm)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: username.to_string(),
            email: normalize_email(&input.email),
            password_hash,
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            is_staff: false,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");
    Ok((StatusCode::CREATED, Json(UserInfo::from(&user))))
}

/// POST /api/auth/change-password
///
/// Verifies the current password, stores the new one, and revokes all
/// refresh sessions.
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let old_valid = verify_password(&input.old_password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !old_valid {
        return Err(AppError::Core(CoreError::Validation(
            "Old password is incorrect".into(),
        )));
    }

    validate_new_password(&input.new_password, &input.new_password_confirm)?;

    let password_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password(&state.pool, user.id, &password_hash).await?;
    SessionRepo::revoke_all_for_user(&state.pool, user.id).await?;

    tracing::info!(user_id = user.id, "Password changed");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Check credentials, enforcing the active flag and the failed-login lockout.
async fn authenticate(state: &AppState, input: &LoginRequest) -> AppResult<User> {
    let username = input.username.trim();
    if username.is_empty() || input.password.is_empty() {
        return Err(AppError::BadRequest(
            "Username and password are required".into(),
        ));
    }

    let Some(user) = UserRepo::find_by_username(&state.pool, username).await? else {
        tracing::warn!(username, "Login attempt for unknown user");
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    };

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    if let Some(locked_until) = user.locked_until {
        if locked_until > Utc::now() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Account is temporarily locked. Try again later.".into(),
            )));
        }
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        let failures = UserRepo::increment_failed_login(&state.pool, user.id).await?;
        tracing::warn!(user_id = user.id, failures, "Failed login");
        if failures >= MAX_FAILED_ATTEMPTS {
            // Locking restarts the count, so the next lock needs a fresh run
            // of failures once this one expires.
            let lock_until = Utc::now() + chrono::Duration::minutes(LOCK_DURATION_MINS);
            UserRepo::lock_account(&state.pool, user.id, lock_until).await?;
            tracing::warn!(user_id = user.id, %lock_until, "Account locked");
        }
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    UserRepo::record_successful_login(&state.pool, user.id).await?;
    Ok(user)
}

/// Generate access + refresh tokens, persist a session row, and build the response.
async fn create_auth_response(
    state: &AppState,
    user: &User,
    origin: &ClientMeta,
) -> AppResult<AuthResponse> {
    let access = generate_access_token(user.id, user.is_staff, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();
    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    SessionRepo::issue(
        &state.pool,
        &NewRefreshSession {
            user_id: user.id,
            token_hash: &refresh_hash,
            expires_at,
            client: origin,
        },
    )
    .await?;

    Ok(AuthResponse {
        access,
        refresh: refresh_plaintext,
        expires_in: state.config.jwt.access_ttl_secs(),
        user: UserInfo::from(user),
    })
}
