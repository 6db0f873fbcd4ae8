//! Rate-limit bucket key derivation for remote servers.
//!
//! Only the key and the applicable rules live here; the limiting algorithm
//! itself is an external collaborator wired up in the API layer.

use lazy_static::lazy_static;
use std::collections::HashMap;
use uuid::Uuid;

/// One rate-limit rule: (max requests, window in seconds).
pub type RateLimitRule = (u32, u64);

/// Rate-limit domain covering all API requests made by a remote server.
pub const API_BY_REMOTE_SERVER: &str = "api_by_remote_server";

lazy_static! {
    static ref RULES: HashMap<&'static str, Vec<RateLimitRule>> = {
        let mut map = HashMap::new();
        map.insert(API_BY_REMOTE_SERVER, vec![(1000, 60)]);
        map
    };
}

/// Rate-limit identity of a remote server within one domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitedRemoteServer {
    uuid: Uuid,
    domain: String,
}

impl RateLimitedRemoteServer {
    /// Create an identity for the given server UUID and domain.
    pub fn new(uuid: Uuid, domain: impl Into<String>) -> Self {
        Self {
            uuid,
            domain: domain.into(),
        }
    }

    /// Create an identity for the default API domain.
    pub fn for_api(uuid: Uuid) -> Self {
        Self::new(uuid, API_BY_REMOTE_SERVER)
    }

    /// The bucket key the limiter stores state under.
    pub fn key(&self) -> String {
        format!("RateLimitedRemoteServer:<{}>:{}", self.uuid, self.domain)
    }

    /// The ordered (requests, window) rules for this identity's domain.
    ///
    /// Unknown domains have no rules and are never limited.
    pub fn rules(&self) -> &'static [RateLimitRule] {
        RULES
            .get(self.domain.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_format() {
        let uuid = Uuid::parse_str("6cde5f7a-1f7e-4978-9716-49f69ebfc9fe").unwrap();
        let limited = RateLimitedRemoteServer::for_api(uuid);
        assert_eq!(
            limited.key(),
            "RateLimitedRemoteServer:<6cde5f7a-1f7e-4978-9716-49f69ebfc9fe>:api_by_remote_server"
        );
    }

    #[test]
    fn test_keys_differ_per_domain() {
        let uuid = Uuid::new_v4();
        let a = RateLimitedRemoteServer::new(uuid, "api_by_remote_server");
        let b = RateLimitedRemoteServer::new(uuid, "push_by_remote_server");
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn test_keys_differ_per_server() {
        let a = RateLimitedRemoteServer::for_api(Uuid::new_v4());
        let b = RateLimitedRemoteServer::for_api(Uuid::new_v4());
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn test_default_domain_rules() {
        let limited = RateLimitedRemoteServer::for_api(Uuid::new_v4());
        assert_eq!(limited.rules(), &[(1000, 60)]);
    }

    #[test]
    fn test_unknown_domain_has_no_rules() {
        let limited = RateLimitedRemoteServer::new(Uuid::new_v4(), "no_such_domain");
        assert!(limited.rules().is_empty());
    }
}
