//! The persistent-store seam for audit records.

use async_trait::async_trait;
use scrutin_audit_types::{AuditRecord, NewAuditRecord};
use thiserror::Error;

/// Failure modes of an audit store.
///
/// The recorder treats every variant identically; the split exists for
/// operator-facing diagnostics.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying database failed the operation.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The store refused the record.
    #[error("record rejected: {0}")]
    Rejected(String),

    /// The store is not reachable or has shut down.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Invalid store configuration.
    #[error("invalid store configuration: {0}")]
    InvalidConfig(String),

    /// A stored row could not be read back.
    #[error("corrupt audit row: {0}")]
    Corrupt(String),
}

/// Append-only persistence for audit records.
///
/// Implementations assign the record id and creation timestamp when they
/// accept a draft. Insertions are independent and commutative; no locking
/// is required above this seam.
#[async_trait]
pub trait AuditStore: Send + Sync {
    /// Persist `draft` and return the stored record.
    async fn insert(&self, draft: NewAuditRecord) -> Result<AuditRecord, StoreError>;

    /// Most recent records, newest first.
    ///
    /// Operational inspection only; the recorder never reads.
    async fn recent(&self, limit: u32) -> Result<Vec<AuditRecord>, StoreError>;
}
