use std::net::IpAddr;

use axum::http::HeaderMap;
use ipnet::IpNet;
use login_throttle_core::AppResult;
use login_throttle_domain::ClientKey;

/// Derives the throttle key for the client behind a request.
#[derive(Debug, Clone, Default)]
pub struct ClientKeyResolver {
    trusted_proxies: Vec<IpNet>,
}

impl ClientKeyResolver {
    pub fn new(trusted_proxies: Vec<IpNet>) -> Self {
        Self { trusted_proxies }
    }

    /// Uses the first `X-Forwarded-For` hop when the peer is a trusted proxy,
    /// otherwise the peer address. A directly connected client can write any
    /// header it likes, so the header is never read from untrusted peers.
    pub fn resolve(&self, headers: &HeaderMap, peer: IpAddr) -> AppResult<ClientKey> {
        let peer = peer.to_canonical();

        let forwarded_client = headers
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .filter(|_| self.is_trusted_proxy(peer))
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|value| !value.is_empty());

        match forwarded_client {
            Some(client) => ClientKey::new(client),
            None => ClientKey::new(peer.to_string()),
        }
    }

    fn is_trusted_proxy(&self, peer: IpAddr) -> bool {
        self.trusted_proxies
            .iter()
            .any(|network| network.contains(&peer))
    }
}
