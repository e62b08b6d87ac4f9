use std::path::PathBuf;

use serde::Deserialize;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the database URL and JWT secret have defaults suitable
/// for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Uploaded media storage and URL settings.
    pub media: MediaConfig,
    /// Cross-domain admin login targets.
    pub proxy: ProxyConfig,
    /// Staff account created at startup if it does not exist yet.
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

/// Where uploads are written and how their URLs are built.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Filesystem directory holding uploads (default: `media`).
    pub root: PathBuf,
    /// URL prefix the media directory is served under (default: `/media`).
    pub url_prefix: String,
    /// Scheme + host prepended to media URLs (default: `http://localhost:8000`).
    pub public_base_url: String,
    /// Maximum accepted upload size in bytes (default: 10 MiB).
    pub max_upload_bytes: usize,
}

/// A client site that accepts proxied staff logins.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSite {
    /// Origin the caller names in `client_domain`, e.g. `https://tolatiles.com`.
    pub domain: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Absolute URL of the site's login endpoint.
    pub login_endpoint: String,
    /// Path appended to `domain` when no redirect URL is configured.
    #[serde(default = "default_admin_path")]
    pub admin_path: String,
    /// Where the browser goes after a successful login.
    pub redirect_url: Option<String>,
}

fn default_admin_path() -> String {
    "/admin/".to_string()
}

impl ClientSite {
    /// Configured redirect, or the site's admin path.
    pub fn resolved_redirect_url(&self) -> String {
        match &self.redirect_url {
            Some(url) if !url.is_empty() => url.clone(),
            _ => format!("{}{}", self.domain, self.admin_path),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub sites: Vec<ClientSite>,
    /// Upstream request timeout in seconds (default: `10`).
    pub timeout_secs: u64,
}

impl ProxyConfig {
    /// Look up a site by its exact domain.
    pub fn site(&self, domain: &str) -> Option<&ClientSite> {
        self.sites.iter().find(|s| s.domain == domain)
    }
}

#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub username: String,
    pub password: String,
    pub email: String,
}

/// Default maximum upload size (10 MiB).
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                    |
    /// |----------------------------|----------------------------|
    /// | `HOST`                     | `0.0.0.0`                  |
    /// | `PORT`                     | `8000`                     |
    /// | `CORS_ORIGINS`             | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                       |
    /// | `PUBLIC_BASE_URL`          | `http://localhost:8000`    |
    /// | `MEDIA_ROOT`               | `media`                    |
    /// | `MEDIA_URL`                | `/media`                   |
    /// | `MAX_UPLOAD_BYTES`         | `10485760`                 |
    /// | `PROXY_CLIENT_SITES`       | `[]`                       |
    /// | `PROXY_TIMEOUT_SECS`       | `10`                       |
    /// | `BOOTSTRAP_ADMIN_USERNAME` | unset                      |
    /// | `BOOTSTRAP_ADMIN_PASSWORD` | unset                      |
    /// | `BOOTSTRAP_ADMIN_EMAIL`    | `<username>@localhost`     |
    ///
    /// JWT settings are read by [`JwtConfig::from_env`].
    ///
    /// # Panics
    ///
    /// Panics on unparsable numbers or a malformed `PROXY_CLIENT_SITES`.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let media = MediaConfig {
            root: PathBuf::from(std::env::var("MEDIA_ROOT").unwrap_or_else(|_| "media".into())),
            url_prefix: std::env::var("MEDIA_URL").unwrap_or_else(|_| "/media".into()),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000".into()),
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
                .parse()
                .expect("MAX_UPLOAD_BYTES must be a valid usize"),
        };

        let sites: Vec<ClientSite> = match std::env::var("PROXY_CLIENT_SITES") {
            Ok(raw) if !raw.trim().is_empty() => serde_json::from_str(&raw)
                .unwrap_or_else(|e| panic!("PROXY_CLIENT_SITES must be a JSON array: {e}")),
            _ => Vec::new(),
        };
        let proxy = ProxyConfig {
            sites,
            timeout_secs: std::env::var("PROXY_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".into())
                .parse()
                .expect("PROXY_TIMEOUT_SECS must be a valid u64"),
        };

        let bootstrap_admin = match (
            std::env::var("BOOTSTRAP_ADMIN_USERNAME"),
            std::env::var("BOOTSTRAP_ADMIN_PASSWORD"),
        ) {
            (Ok(username), Ok(password)) if !username.is_empty() && !password.is_empty() => {
                let email = std::env::var("BOOTSTRAP_ADMIN_EMAIL")
                    .unwrap_or_else(|_| format!("{username}@localhost"));
                Some(BootstrapAdmin {
                    username,
                    password,
                    email,
                })
            }
            _ => None,
        };

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            media,
            proxy,
            bootstrap_admin,
        }
    }
}
