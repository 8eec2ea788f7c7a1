//! The audit record entity.

use crate::{AuditAction, AuditRecordId};
use chrono::{DateTime, Utc};
use scrutin_common_core::VoterId;
use serde::{Deserialize, Serialize};

/// A single immutable entry in the audit trail.
///
/// Records are created once and never updated or deleted. A record returned
/// by the recorder is either the row the store persisted or, when the store
/// failed, a locally built equivalent; the two are indistinguishable by
/// type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Unique record identifier.
    pub id: AuditRecordId,
    /// The authenticated principal behind the action, if any.
    pub actor_id: Option<VoterId>,
    /// Machine-readable action label.
    pub action: AuditAction,
    /// Human-readable free-text detail.
    pub description: String,
    /// Network origin of the triggering request.
    pub source_address: String,
    /// When the record was persisted (or locally built).
    pub created_at: DateTime<Utc>,
}

/// The pre-persistence field set for an audit record.
///
/// Assembled by the recorder from the request context and call arguments.
/// The store assigns `id` and `created_at` when it accepts the draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAuditRecord {
    /// Resolved actor, `None` for unauthenticated actions.
    pub actor_id: Option<VoterId>,
    /// Machine-readable action label.
    pub action: AuditAction,
    /// Human-readable free-text detail.
    pub description: String,
    /// Network origin of the triggering request.
    pub source_address: String,
}

impl NewAuditRecord {
    /// Materialize an unpersisted record from these fields.
    ///
    /// Used when the store rejects the draft: the id and timestamp are
    /// assigned locally instead of by the store.
    pub fn into_unpersisted(self) -> AuditRecord {
        AuditRecord {
            id: AuditRecordId::new(),
            actor_id: self.actor_id,
            action: self.action,
            description: self.description,
            source_address: self.source_address,
            created_at: Utc::now(),
        }
    }
}
