//! Typed event helpers over the audit write path.

use crate::context::RequestContext;
use crate::recorder::AuditRecorder;
use scrutin_audit_types::{AuditAction, AuditRecord};
use scrutin_common_core::{ElectionId, VoterId};

/// Records authentication events.
pub struct SecurityEventRecorder {
    recorder: AuditRecorder,
}

impl SecurityEventRecorder {
    /// Create a new security event recorder.
    pub fn new(recorder: AuditRecorder) -> Self {
        Self { recorder }
    }

    /// Record a successful login.
    pub async fn login(&self, ctx: &dyn RequestContext, voter: VoterId) -> AuditRecord {
        self.recorder
            .record(ctx, AuditAction::Login, "voter signed in", Some(voter))
            .await
    }

    /// Record a failed login attempt.
    ///
    /// There is no authenticated principal here; the attempted username
    /// goes into the description instead.
    pub async fn login_failed(
        &self,
        ctx: &dyn RequestContext,
        username: &str,
        reason: &str,
    ) -> AuditRecord {
        self.recorder
            .record(
                ctx,
                AuditAction::LoginFailed,
                format!("login failed for '{}': {}", username, reason),
                None,
            )
            .await
    }

    /// Record a logout.
    pub async fn logout(&self, ctx: &dyn RequestContext, voter: VoterId) -> AuditRecord {
        self.recorder
            .record(ctx, AuditAction::Logout, "voter signed out", Some(voter))
            .await
    }
}

/// Records ballot lifecycle events.
pub struct BallotEventRecorder {
    recorder: AuditRecorder,
}

impl BallotEventRecorder {
    /// Create a new ballot event recorder.
    pub fn new(recorder: AuditRecorder) -> Self {
        Self { recorder }
    }

    /// Record an accepted ballot.
    pub async fn ballot_cast(
        &self,
        ctx: &dyn RequestContext,
        election: ElectionId,
        voter: VoterId,
    ) -> AuditRecord {
        self.recorder
            .record(
                ctx,
                AuditAction::BallotCast,
                format!("ballot cast in {}", election),
                Some(voter),
            )
            .await
    }

    /// Record a rejected ballot.
    pub async fn ballot_rejected(
        &self,
        ctx: &dyn RequestContext,
        election: ElectionId,
        reason: &str,
    ) -> AuditRecord {
        self.recorder
            .record(
                ctx,
                AuditAction::BallotRejected,
                format!("ballot rejected in {}: {}", election, reason),
                None,
            )
            .await
    }

    /// Record a voter verifying their ballot receipt.
    pub async fn ballot_verified(
        &self,
        ctx: &dyn RequestContext,
        election: ElectionId,
        voter: VoterId,
    ) -> AuditRecord {
        self.recorder
            .record(
                ctx,
                AuditAction::BallotVerified,
                format!("ballot receipt verified in {}", election),
                Some(voter),
            )
            .await
    }
}
