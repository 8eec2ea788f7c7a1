//! In-memory audit store for tests and embedded use.

use crate::store::{AuditStore, StoreError};
use async_trait::async_trait;
use chrono::Utc;
use scrutin_audit_types::{AuditRecord, AuditRecordId, NewAuditRecord};
use std::sync::{Arc, Mutex, MutexGuard};

/// Audit store that keeps records in process memory.
///
/// Shares the insert contract of the SQLite store, plus a failure switch so
/// callers can exercise the recorder's degraded path deterministically.
#[derive(Clone, Default)]
pub struct MemoryAuditStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    records: Vec<AuditRecord>,
    reject_reason: Option<String>,
}

impl MemoryAuditStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent insert fail with `reason`.
    pub fn reject_writes(&self, reason: impl Into<String>) {
        self.lock().reject_reason = Some(reason.into());
    }

    /// Clear a previously set failure switch.
    pub fn accept_writes(&self) {
        self.lock().reject_reason = None;
    }

    /// Snapshot of all stored records, oldest first.
    pub fn records(&self) -> Vec<AuditRecord> {
        self.lock().records.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().records.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Records are only ever pushed whole; a poisoned guard is usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl AuditStore for MemoryAuditStore {
    async fn insert(&self, draft: NewAuditRecord) -> Result<AuditRecord, StoreError> {
        let mut inner = self.lock();

        if let Some(reason) = &inner.reject_reason {
            return Err(StoreError::Rejected(reason.clone()));
        }

        let record = AuditRecord {
            id: AuditRecordId::new(),
            actor_id: draft.actor_id,
            action: draft.action,
            description: draft.description,
            source_address: draft.source_address,
            created_at: Utc::now(),
        };
        inner.records.push(record.clone());

        Ok(record)
    }

    async fn recent(&self, limit: u32) -> Result<Vec<AuditRecord>, StoreError> {
        let inner = self.lock();
        Ok(inner
            .records
            .iter()
            .rev()
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrutin_audit_types::AuditAction;

    fn draft(description: &str) -> NewAuditRecord {
        NewAuditRecord {
            actor_id: None,
            action: AuditAction::Login,
            description: description.to_string(),
            source_address: "127.0.0.1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_timestamp() {
        let store = MemoryAuditStore::new();
        let a = store.insert(draft("first")).await.unwrap();
        let b = store.insert(draft("second")).await.unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_recent_is_newest_first() {
        let store = MemoryAuditStore::new();
        store.insert(draft("first")).await.unwrap();
        store.insert(draft("second")).await.unwrap();

        let recent = store.recent(1).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].description, "second");
    }

    #[tokio::test]
    async fn test_reject_switch() {
        let store = MemoryAuditStore::new();
        store.reject_writes("disk full");

        let err = store.insert(draft("dropped")).await.unwrap_err();
        assert!(err.to_string().contains("disk full"));
        assert!(store.is_empty());

        store.accept_writes();
        store.insert(draft("kept")).await.unwrap();
        assert_eq!(store.len(), 1);
    }
}
