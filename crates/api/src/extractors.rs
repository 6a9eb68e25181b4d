//! Request extractors.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, FromRef, FromRequestParts},
    http::{HeaderMap, request::Parts},
};
use moviecat_common::{AppError, SiteConfig};

/// Address of the client that sent the request.
///
/// When the socket peer is one of `site.trusted_proxies`, the first
/// `X-Forwarded-For` entry wins, then `X-Real-IP`. Otherwise the peer
/// address is used and forwarding headers are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientIp(pub IpAddr);

/// Resolve the client address from the peer and, for trusted peers, the
/// forwarding headers.
#[must_use]
pub fn client_ip(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    trusted: &[IpAddr],
) -> Option<IpAddr> {
    let peer_ip = peer.map(|addr| addr.ip());
    let from_proxy = peer_ip.is_some_and(|ip| trusted.contains(&ip));
    if !from_proxy {
        return peer_ip;
    }

    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(|v| v.trim().parse().ok());
    let real_ip = || {
        headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
    };

    forwarded.or_else(real_ip).or(peer_ip)
}

impl<S> FromRequestParts<S> for ClientIp
where
    Arc<SiteConfig>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let site = Arc::<SiteConfig>::from_ref(state);
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        client_ip(&parts.headers, peer, &site.trusted_proxies)
            .map(Self)
            .ok_or_else(|| AppError::BadRequest("Cannot determine client address".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn peer(addr: &str) -> Option<SocketAddr> {
        Some(addr.parse().unwrap())
    }

    fn forwarded(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", value.parse().unwrap());
        headers
    }

    fn trusting(proxies: &[&str]) -> Arc<SiteConfig> {
        Arc::new(SiteConfig {
            trusted_proxies: proxies.iter().map(|p| p.parse().unwrap()).collect(),
            ..SiteConfig::default()
        })
    }

    #[test]
    fn test_untrusted_peer_ignores_forwarded_for() {
        let ip = client_ip(
            &forwarded("203.0.113.7"),
            peer("198.51.100.4:5000"),
            &["10.0.0.1".parse().unwrap()],
        );
        assert_eq!(ip, Some("198.51.100.4".parse().unwrap()));
    }

    #[test]
    fn test_trusted_proxy_forwarded_for_takes_first_hop() {
        let ip = client_ip(
            &forwarded("203.0.113.7, 10.0.0.1"),
            peer("10.0.0.1:5000"),
            &["10.0.0.1".parse().unwrap()],
        );
        assert_eq!(ip, Some("203.0.113.7".parse().unwrap()));
    }

    #[test]
    fn test_trusted_proxy_falls_back_to_real_ip_then_peer() {
        let trusted = ["10.0.0.1".parse().unwrap()];
        let mut headers = forwarded("garbage");
        headers.insert("x-real-ip", "2001:db8::2".parse().unwrap());

        let ip = client_ip(&headers, peer("10.0.0.1:5000"), &trusted);
        assert_eq!(ip, Some("2001:db8::2".parse().unwrap()));

        let ip = client_ip(&forwarded("garbage"), peer("10.0.0.1:5000"), &trusted);
        assert_eq!(ip, Some("10.0.0.1".parse().unwrap()));
    }

    #[test]
    fn test_headers_without_peer_are_not_trusted() {
        assert_eq!(client_ip(&forwarded("203.0.113.7"), None, &[]), None);
    }

    #[tokio::test]
    async fn test_extractor_uses_peer_when_no_proxy_is_trusted() {
        let mut request = Request::builder()
            .header("x-forwarded-for", "203.0.113.7")
            .body(())
            .unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo("[2001:db8::5]:4000".parse::<SocketAddr>().unwrap()));
        let (mut parts, ()) = request.into_parts();

        let ClientIp(ip) = ClientIp::from_request_parts(&mut parts, &trusting(&[]))
            .await
            .unwrap();
        assert_eq!(ip, "2001:db8::5".parse::<IpAddr>().unwrap());
    }

    #[tokio::test]
    async fn test_extractor_without_address() {
        let (mut parts, ()) = Request::builder().body(()).unwrap().into_parts();
        assert!(matches!(
            ClientIp::from_request_parts(&mut parts, &trusting(&["10.0.0.1"])).await,
            Err(AppError::BadRequest(_))
        ));
    }
}
