//! HTTP transport: base URL handling, credentials, refresh-and-retry.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ClientError;
use crate::models::{AdminToken, TokenPair, UserInfo};
use crate::session::Session;
use crate::storage::TokenStore;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server origin, e.g. `http://localhost:8000`. `/api` is appended.
    pub base_url: String,
    /// Whole-request timeout, refresh calls included.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// One request, kept in a form that can be replayed after a refresh.
struct Call {
    method: Method,
    path: String,
    query: Option<serde_json::Value>,
    body: Option<serde_json::Value>,
}

struct Inner<S> {
    http: reqwest::Client,
    api_url: String,
    session: Session<S>,
    /// Serialises refresh attempts so concurrent 401s trigger one refresh.
    refresh_lock: tokio::sync::Mutex<()>,
}

/// Client for the Tola Tiles API. Cheap to clone.
pub struct ApiClient<S> {
    inner: Arc<Inner<S>>,
}

impl<S> Clone for ApiClient<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: TokenStore> ApiClient<S> {
    pub fn new(config: ClientConfig, store: S) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self::with_client(http, config, store))
    }

    /// Reuse an existing [`reqwest::Client`].
    pub fn with_client(http: reqwest::Client, config: ClientConfig, store: S) -> Self {
        Self {
            inner: Arc::new(Inner {
                http,
                api_url: format!("{}/api", config.base_url.trim_end_matches('/')),
                session: Session::new(store),
                refresh_lock: tokio::sync::Mutex::new(()),
            }),
        }
    }

    pub fn session(&self) -> &Session<S> {
        &self.inner.session
    }

    // ---- authentication ----

    /// Log in with a JWT pair and remember it.
    pub async fn login(&self, username: &str, password: &str) -> Result<UserInfo, ClientError> {
        let body = serde_json::json!({ "username": username, "password": password });
        let pair: TokenPair = self
            .send_json(Method::POST, "/auth/login", None, Some(body))
            .await?;
        self.remember(pair)
    }

    /// Staff login that stores a static API token.
    pub async fn admin_login(&self, username: &str, password: &str) -> Result<UserInfo, ClientError> {
        let body = serde_json::json!({ "username": username, "password": password });
        let admin: AdminToken = self
            .send_json(Method::POST, "/auth/admin-login", None, Some(body))
            .await?;
        let session = self.session();
        session.store_api_token(&admin.token)?;
        session.store_user(admin.user.clone())?;
        tracing::debug!(user_id = admin.user.id, "Admin token stored");
        Ok(admin.user)
    }

    /// Tell the server to revoke credentials, then forget them locally even
    /// if that call failed.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let result = self
            .send_empty(Method::POST, "/auth/logout", None, Some(serde_json::json!({})))
            .await;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "Server logout failed, clearing local session anyway");
        }
        self.session().logout()
    }

    pub async fn current_user(&self) -> Result<UserInfo, ClientError> {
        self.send_json(Method::GET, "/auth/user", None, None).await
    }

    fn remember(&self, pair: TokenPair) -> Result<UserInfo, ClientError> {
        let session = self.session();
        session.store_tokens(Some(&pair.access), Some(&pair.refresh))?;
        session.store_user(pair.user.clone())?;
        Ok(pair.user)
    }

    /// Exchange the stored refresh token for a new pair. Any failure clears
    /// the session.
    async fn refresh(&self, refresh: &str) -> Result<(), ClientError> {
        tracing::debug!("Access token rejected, refreshing");
        let url = format!("{}/auth/refresh", self.inner.api_url);
        let response = self
            .inner
            .http
            .post(url)
            .json(&serde_json::json!({ "refresh": refresh }))
            .send()
            .await;

        let pair = match response {
            Ok(r) if r.status().is_success() => r.json::<TokenPair>().await.ok(),
            Ok(r) => {
                tracing::info!(status = r.status().as_u16(), "Token refresh rejected");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Token refresh request failed");
                None
            }
        };

        match pair {
            Some(pair) => {
                let user = self.remember(pair)?;
                tracing::debug!(user_id = user.id, "Token pair refreshed");
                Ok(())
            }
            None => {
                self.session().logout()?;
                Err(ClientError::Unauthorized)
            }
        }
    }

    // ---- transport ----

    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Option<serde_json::Value>,
        body: Option<serde_json::Value>,
    ) -> Result<T, ClientError> {
        let call = Call {
            method,
            path: path.to_string(),
            query,
            body,
        };
        let response = self.execute(&call).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub(crate) async fn send_empty(
        &self,
        method: Method,
        path: &str,
        query: Option<serde_json::Value>,
        body: Option<serde_json::Value>,
    ) -> Result<(), ClientError> {
        let call = Call {
            method,
            path: path.to_string(),
            query,
            body,
        };
        self.execute(&call).await.map(|_| ())
    }

    /// Send a call; on a 401 with a refresh token stored, refresh once and
    /// replay it.
    async fn execute(&self, call: &Call) -> Result<reqwest::Response, ClientError> {
        let header = self.session().authorization_header();
        let response = self.dispatch(call, header.as_deref()).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Self::ensure_success(response).await;
        }
        let Some(refresh) = self.session().refresh_token() else {
            return Self::ensure_success(response).await;
        };

        {
            let _guard = self.inner.refresh_lock.lock().await;
            // Another task may have refreshed while we waited.
            if self.session().authorization_header() == header {
                self.refresh(&refresh).await?;
            }
        }

        let header = self.session().authorization_header();
        let retried = self.dispatch(call, header.as_deref()).await?;
        Self::ensure_success(retried).await
    }

    async fn dispatch(
        &self,
        call: &Call,
        authorization: Option<&str>,
    ) -> Result<reqwest::Response, ClientError> {
        let url = format!("{}{}", self.inner.api_url, call.path);
        let mut request = self.inner.http.request(call.method.clone(), url);
        if let Some(query) = call.query.as_ref().filter(|q| !q.is_null()) {
            request = request.query(query);
        }
        if let Some(body) = &call.body {
            request = request.json(body);
        }
        if let Some(authorization) = authorization {
            request = request.header(reqwest::header::AUTHORIZATION, authorization);
        }
        Ok(request.send().await?)
    }

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::from_body(status.as_u16(), &body))
    }
}

/// Serialize a query or body, turning serializer failures into [`ClientError::Decode`].
pub(crate) fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<serde_json::Value, ClientError> {
    Ok(serde_json::to_value(value)?)
}
