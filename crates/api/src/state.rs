use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: tola_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Outbound HTTP client used by the proxy login.
    pub http: reqwest::Client,
}

impl AppState {
    /// Build state from a pool and config, creating the outbound HTTP client
    /// with the configured proxy timeout.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built (TLS backend failure).
    pub fn new(pool: tola_db::DbPool, config: ServerConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.proxy.timeout_secs))
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            pool,
            config: Arc::new(config),
            http,
        }
    }

    /// Absolute URL for a media-relative path.
    pub fn media_url(&self, path: &str) -> String {
        let media = &self.config.media;
        tola_core::media::media_url(&media.public_base_url, &media.url_prefix, path)
    }

    /// [`AppState::media_url`] for optional image columns.
    pub fn optional_media_url(&self, path: Option<&str>) -> Option<String> {
        let media = &self.config.media;
        tola_core::media::optional_media_url(&media.public_base_url, &media.url_prefix, path)
    }
}
