#![allow(dead_code)]

use std::path::PathBuf;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use tola_api::auth::jwt::JwtConfig;
use tola_api::auth::password::hash_password;
use tola_api::config::{ClientSite, MediaConfig, ProxyConfig, ServerConfig};
use tola_api::router::{build_app, App};
use tola_api::state::AppState;
use tola_db::models::user::{CreateUser, User};
use tola_db::repositories::UserRepo;

pub const TEST_PASSWORD: &str = "test_password_123!";

/// Build a test `ServerConfig` with safe defaults.
///
/// Media is written under `media_root`; one proxy site is configured at
/// `proxy_base` (a wiremock server in the proxy tests).
pub fn test_config_with(media_root: PathBuf, proxy_base: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 60,
            refresh_token_expiry_days: 7,
        },
        media: MediaConfig {
            root: media_root,
            url_prefix: "/media".to_string(),
            public_base_url: "http://testserver".to_string(),
            max_upload_bytes: 1024 * 1024,
        },
        proxy: ProxyConfig {
            sites: vec![ClientSite {
                domain: "https://client.example".to_string(),
                name: "Client".to_string(),
                login_endpoint: format!("{proxy_base}/api/auth/login/"),
                admin_path: "/admin/".to_string(),
                redirect_url: None,
            }],
            timeout_secs: 2,
        },
        bootstrap_admin: None,
    }
}

pub fn test_config() -> ServerConfig {
    test_config_with(std::env::temp_dir().join("tola-test-media"), "http://127.0.0.1:9")
}

/// Build the full application (router, middleware, path normalization).
pub fn build_test_app(pool: PgPool) -> App {
    build_test_app_with(pool, test_config())
}

pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> App {
    let state = AppState::new(pool, config.clone());
    build_app(state, &config)
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Create a user directly in the database with [`TEST_PASSWORD`].
pub async fn create_test_user(pool: &PgPool, username: &str, is_staff: bool) -> User {
    let hashed = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@test.com"),
        password_hash: hashed,
        first_name: String::new(),
        last_name: String::new(),
        is_staff,
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Create a staff user and return a JWT `Authorization` header value.
pub async fn staff_bearer(pool: &PgPool) -> String {
    create_test_user(pool, "staff", true).await;
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/auth/login",
        serde_json::json!({"username": "staff", "password": TEST_PASSWORD}),
    )
    .await;
    assert_eq!(response.status(), 200, "staff login should succeed");
    let json = body_json(response).await;
    format!("Bearer {}", json["access"].as_str().unwrap())
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(app: App, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn json_request(
    method: Method,
    uri: &str,
    auth: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn get(app: App, uri: &str) -> Response<Body> {
    send(app, json_request(Method::GET, uri, None, None)).await
}

pub async fn get_auth(app: App, uri: &str, auth: &str) -> Response<Body> {
    send(app, json_request(Method::GET, uri, Some(auth), None)).await
}

pub async fn post_json(app: App, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, None, Some(body))).await
}

pub async fn post_json_auth(
    app: App,
    uri: &str,
    auth: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, json_request(Method::POST, uri, Some(auth), Some(body))).await
}

pub async fn put_json_auth(
    app: App,
    uri: &str,
    auth: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, Some(auth), Some(body))).await
}

pub async fn delete_auth(app: App, uri: &str, auth: &str) -> Response<Body> {
    send(app, json_request(Method::DELETE, uri, Some(auth), None)).await
}

/// Send a multipart upload with a single `file` part.
pub async fn upload_auth(
    app: App,
    uri: &str,
    auth: &str,
    filename: &str,
    bytes: &[u8],
) -> Response<Body> {
    let boundary = "tola-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("authorization", auth)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
