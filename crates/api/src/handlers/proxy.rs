//! Cross-domain staff login proxied to a configured client site.
//!
//! The browser cannot post credentials to the client site directly (CORS),
//! so the server forwards them and relays the site's token.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tola_core::error::CoreError;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProxyLoginRequest {
    #[serde(default)]
    pub client_domain: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct ProxyLoginResponse {
    pub token: String,
    pub redirect_url: String,
    /// The client site's user object, relayed as-is.
    pub user: serde_json::Value,
    pub client_domain: String,
}

/// Expected success body from a client site.
#[derive(Debug, Deserialize)]
struct UpstreamLogin {
    token: Option<String>,
    #[serde(default)]
    user: serde_json::Value,
}

/// POST /api/auth/proxy-login
pub async fn proxy_login(
    State(state): State<AppState>,
    Json(input): Json<ProxyLoginRequest>,
) -> AppResult<Json<ProxyLoginResponse>> {
    if input.client_domain.is_empty() || input.username.is_empty() || input.password.is_empty() {
        return Err(AppError::BadRequest(
            "client_domain, username, and password are required".into(),
        ));
    }

    let site = state.config.proxy.site(&input.client_domain).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Client domain {} is not supported",
            input.client_domain
        ))
    })?;

    tracing::info!(
        endpoint = %site.login_endpoint,
        username = %input.username,
        "Proxying login request"
    );

    let response = state
        .http
        .post(&site.login_endpoint)
        .json(&serde_json::json!({
            "username": input.username,
            "password": input.password,
        }))
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                tracing::warn!(error = %e, "Proxy login timed out");
                AppError::GatewayTimeout(
                    "Request timeout. The client website may be unavailable.".into(),
                )
            } else {
                tracing::warn!(error = %e, "Proxy login connection failed");
                AppError::BadGateway(
                    "Unable to connect to the client website. Please try again later.".into(),
                )
            }
        })?;

    let status = response.status();
    match status.as_u16() {
        200 => {
            let body: UpstreamLogin = response.json().await.map_err(|e| {
                tracing::error!(error = %e, "Client site returned an unreadable body");
                AppError::Upstream("No token received from client site".into())
            })?;
            let token = body
                .token
                .filter(|t| !t.is_empty())
                .ok_or_else(|| AppError::Upstream("No token received from client site".into()))?;

            Ok(Json(ProxyLoginResponse {
                token,
                redirect_url: site.resolved_redirect_url(),
                user: body.user,
                client_domain: input.client_domain,
            }))
        }
        401 => Err(AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        ))),
        403 => Err(AppError::Core(CoreError::Forbidden(
            "Access denied. You may not have permission to access this site.".into(),
        ))),
        code => {
            let text = response.text().await.unwrap_or_default();
            tracing::error!(status = code, body = %text, "Client login failed");
            Err(AppError::Upstream(format!("Login failed: {code}")))
        }
    }
}
