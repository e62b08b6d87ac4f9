//! Credential bookkeeping on top of a [`TokenStore`].

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::error::ClientError;
use crate::models::UserInfo;
use crate::storage::{StoredAuth, TokenStore};

#[derive(Debug, Deserialize)]
struct ExpiryClaim {
    exp: i64,
}

/// Read the `exp` claim of a JWT without verifying its signature.
///
/// Only the server can verify the token; the client just needs to know when
/// to stop sending it.
pub fn token_expiry(token: &str) -> Option<DateTime<Utc>> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<ExpiryClaim>(token, &DecodingKey::from_secret(&[]), &validation).ok()?;
    DateTime::from_timestamp(data.claims.exp, 0)
}

fn clean(token: Option<&str>) -> Option<String> {
    token.map(str::trim).filter(|t| !t.is_empty()).map(str::to_string)
}

/// Session state backed by a token store.
pub struct Session<S> {
    store: S,
}

impl<S: TokenStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn load(&self) -> Result<StoredAuth, ClientError> {
        self.store.load()
    }

    /// Store a JWT pair. Tokens are trimmed; empty ones leave the stored value alone.
    pub fn store_tokens(&self, access: Option<&str>, refresh: Option<&str>) -> Result<(), ClientError> {
        let mut auth = self.store.load()?;
        if let Some(access) = clean(access) {
            auth.access = Some(access);
        }
        if let Some(refresh) = clean(refresh) {
            auth.refresh = Some(refresh);
        }
        self.store.save(&auth)
    }

    pub fn store_api_token(&self, token: &str) -> Result<(), ClientError> {
        let Some(token) = clean(Some(token)) else {
            return Ok(());
        };
        let mut auth = self.store.load()?;
        auth.api_token = Some(token);
        self.store.save(&auth)
    }

    pub fn store_user(&self, user: UserInfo) -> Result<(), ClientError> {
        let mut auth = self.store.load()?;
        auth.user = Some(user);
        self.store.save(&auth)
    }

    /// Expiry of the stored access token, if it has a readable `exp`.
    pub fn token_expiry(&self) -> Option<DateTime<Utc>> {
        let auth = self.store.load().ok()?;
        token_expiry(auth.access.as_deref()?)
    }

    /// Whether the access token expires within `leeway`. A missing or
    /// unreadable access token counts as expired.
    pub fn is_expired(&self, leeway: Duration) -> bool {
        match self.token_expiry() {
            Some(exp) => exp <= Utc::now() + leeway,
            None => true,
        }
    }

    /// An API token, or an access token that has not expired yet.
    pub fn is_authenticated(&self) -> bool {
        let Ok(auth) = self.store.load() else {
            return false;
        };
        if auth.api_token.as_deref().is_some_and(|t| !t.is_empty()) {
            return true;
        }
        auth.access.is_some() && !self.is_expired(Duration::zero())
    }

    pub fn is_admin(&self) -> bool {
        self.current_user().is_some_and(|u| u.is_staff)
    }

    pub fn current_user(&self) -> Option<UserInfo> {
        self.store.load().ok()?.user
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.store.load().ok()?.refresh
    }

    /// `Bearer <jwt>` when an access token is stored, else `Token <key>`.
    pub fn authorization_header(&self) -> Option<String> {
        let auth = self.store.load().ok()?;
        if let Some(access) = auth.access.filter(|t| !t.is_empty()) {
            return Some(format!("Bearer {access}"));
        }
        auth.api_token
            .filter(|t| !t.is_empty())
            .map(|key| format!("Token {key}"))
    }

    pub fn logout(&self) -> Result<(), ClientError> {
        self.store.clear()
    }
}
