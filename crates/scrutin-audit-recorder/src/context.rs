//! Request context capability seam.

use scrutin_common_core::VoterId;

/// What the transport layer knows about the current request.
///
/// The recorder reads the source address from here, and falls back to the
/// authenticated voter when no explicit actor is supplied. Resolution never
/// fails: an absent session simply yields `None`.
pub trait RequestContext: Send + Sync {
    /// Network origin of the request, as reported by the transport layer.
    fn source_address(&self) -> &str;

    /// The authenticated voter behind the request, if a session exists.
    fn authenticated_voter(&self) -> Option<VoterId>;
}

/// Owned request metadata.
///
/// For handlers that already extracted transport data, and for tests.
#[derive(Debug, Clone)]
pub struct RequestInfo {
    source_address: String,
    voter: Option<VoterId>,
}

impl RequestInfo {
    /// Create a context with the given source address and no session.
    pub fn new(source_address: impl Into<String>) -> Self {
        Self {
            source_address: source_address.into(),
            voter: None,
        }
    }

    /// Attach the authenticated voter.
    pub fn with_voter(mut self, voter: VoterId) -> Self {
        self.voter = Some(voter);
        self
    }
}

impl RequestContext for RequestInfo {
    fn source_address(&self) -> &str {
        &self.source_address
    }

    fn authenticated_voter(&self) -> Option<VoterId> {
        self.voter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_info_defaults_to_no_session() {
        let ctx = RequestInfo::new("203.0.113.7");
        assert_eq!(ctx.source_address(), "203.0.113.7");
        assert_eq!(ctx.authenticated_voter(), None);
    }

    #[test]
    fn test_request_info_with_voter() {
        let voter = VoterId::new();
        let ctx = RequestInfo::new("203.0.113.7").with_voter(voter);
        assert_eq!(ctx.authenticated_voter(), Some(voter));
    }
}
