//! Request origin recorded on refresh sessions.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use tola_db::models::session::ClientMeta;

/// Longest `User-Agent` kept on a session row.
const MAX_USER_AGENT_CHARS: usize = 512;

/// The caller's `User-Agent` and address.
///
/// The address is the first `X-Forwarded-For` hop when a proxy set one,
/// otherwise the TCP peer. Both stay `None` when unknown; the extractor never
/// rejects.
#[derive(Debug, Clone, Default)]
pub struct RequestOrigin(pub ClientMeta);

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

impl RequestOrigin {
    fn from_parts(parts: &Parts) -> Self {
        let user_agent = header_str(&parts.headers, "user-agent")
            .map(|ua| ua.chars().take(MAX_USER_AGENT_CHARS).collect());

        let forwarded = header_str(&parts.headers, "x-forwarded-for")
            .and_then(|chain| chain.split(',').next())
            .map(str::trim)
            .filter(|hop| !hop.is_empty())
            .map(str::to_string);
        let ip_address = forwarded.or_else(|| {
            parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(peer)| peer.ip().to_string())
        });

        Self(ClientMeta {
            user_agent,
            ip_address,
        })
    }
}

impl<S: Send + Sync> FromRequestParts<S> for RequestOrigin {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(builder: axum::http::request::Builder) -> Parts {
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn forwarded_for_takes_first_hop() {
        let parts = parts(
            Request::builder()
                .header("user-agent", "tola-admin/2.1")
                .header("x-forwarded-for", "203.0.113.7, 10.0.0.1"),
        );
        let RequestOrigin(meta) = RequestOrigin::from_parts(&parts);
        assert_eq!(meta.user_agent.as_deref(), Some("tola-admin/2.1"));
        assert_eq!(meta.ip_address.as_deref(), Some("203.0.113.7"));
    }

    #[test]
    fn falls_back_to_peer_address() {
        let mut parts = parts(Request::builder());
        let peer: SocketAddr = "198.51.100.4:51000".parse().unwrap();
        parts.extensions.insert(ConnectInfo(peer));

        let RequestOrigin(meta) = RequestOrigin::from_parts(&parts);
        assert_eq!(meta.user_agent, None);
        assert_eq!(meta.ip_address.as_deref(), Some("198.51.100.4"));
    }

    #[test]
    fn long_user_agent_is_truncated() {
        let ua = "x".repeat(2000);
        let parts = parts(Request::builder().header("user-agent", ua.as_str()));
        let RequestOrigin(meta) = RequestOrigin::from_parts(&parts);
        assert_eq!(meta.user_agent.map(|s| s.len()), Some(MAX_USER_AGENT_CHARS));
    }
}
