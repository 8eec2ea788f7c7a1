//! The audit write path.

use crate::context::RequestContext;
use scrutin_audit_store::AuditStore;
use scrutin_audit_types::{AuditAction, AuditRecord, NewAuditRecord};
use scrutin_common_core::VoterId;
use std::sync::Arc;
use tracing::error;

/// Records audit entries without ever failing the audited action.
///
/// Cheap to clone; every clone writes through the same shared store.
#[derive(Clone)]
pub struct AuditRecorder {
    store: Arc<dyn AuditStore>,
}

impl AuditRecorder {
    /// Create a recorder writing through `store`.
    pub fn new(store: Arc<dyn AuditStore>) -> Self {
        Self { store }
    }

    /// Record one audit entry and return it.
    ///
    /// The explicit `actor` wins over the context's authenticated voter;
    /// both being absent is a valid state, not an error. Exactly one
    /// persistence attempt is made, with no retry or queueing. When the
    /// store fails, the failure stops here: a diagnostic goes to the error
    /// channel and the caller receives an equivalent unpersisted record.
    /// The return type does not distinguish the two outcomes.
    pub async fn record(
        &self,
        ctx: &dyn RequestContext,
        action: AuditAction,
        description: impl Into<String>,
        actor: Option<VoterId>,
    ) -> AuditRecord {
        let actor_id = actor.or_else(|| ctx.authenticated_voter());

        let draft = NewAuditRecord {
            actor_id,
            action,
            description: description.into(),
            source_address: ctx.source_address().to_string(),
        };

        match self.store.insert(draft.clone()).await {
            Ok(record) => record,
            Err(e) => {
                error!("Failed to persist audit record: {}", e);
                draft.into_unpersisted()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RequestInfo;
    use scrutin_audit_store::MemoryAuditStore;
    use std::io;
    use std::sync::Mutex;
    use tracing_subscriber::fmt::MakeWriter;

    fn recorder_with_store() -> (AuditRecorder, MemoryAuditStore) {
        let store = MemoryAuditStore::new();
        (AuditRecorder::new(Arc::new(store.clone())), store)
    }

    /// Scenario: store succeeds, unauthenticated request.
    #[tokio::test]
    async fn test_record_persists_fields() {
        let (recorder, store) = recorder_with_store();
        let ctx = RequestInfo::new("203.0.113.7");

        let record = recorder
            .record(&ctx, AuditAction::LoginFailed, "bad password", None)
            .await;

        assert_eq!(record.actor_id, None);
        assert_eq!(record.action, AuditAction::LoginFailed);
        assert_eq!(record.description, "bad password");
        assert_eq!(record.source_address, "203.0.113.7");

        let stored = store.records();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, record.id);
    }

    /// Scenario: store fails; the call still returns, with identical
    /// field values, and nothing is persisted.
    #[tokio::test]
    async fn test_store_failure_returns_equivalent_record() {
        let (recorder, store) = recorder_with_store();
        store.reject_writes("constraint violation");
        let voter = VoterId::new();
        let ctx = RequestInfo::new("203.0.113.7").with_voter(voter);

        let record = recorder
            .record(&ctx, AuditAction::BallotCast, "ballot accepted", None)
            .await;

        assert_eq!(record.actor_id, Some(voter));
        assert_eq!(record.action, AuditAction::BallotCast);
        assert_eq!(record.description, "ballot accepted");
        assert_eq!(record.source_address, "203.0.113.7");
        assert!(store.is_empty());
    }

    /// An explicit actor wins over the context's authenticated voter.
    #[tokio::test]
    async fn test_explicit_actor_wins() {
        let (recorder, _store) = recorder_with_store();
        let explicit = VoterId::new();
        let session = VoterId::new();
        let ctx = RequestInfo::new("10.0.0.1").with_voter(session);

        let record = recorder
            .record(&ctx, AuditAction::VoterUpdated, "address change", Some(explicit))
            .await;

        assert_eq!(record.actor_id, Some(explicit));
    }

    /// Without an explicit actor the context's voter is used.
    #[tokio::test]
    async fn test_actor_falls_back_to_context() {
        let (recorder, _store) = recorder_with_store();
        let session = VoterId::new();
        let ctx = RequestInfo::new("10.0.0.1").with_voter(session);

        let record = recorder
            .record(&ctx, AuditAction::Logout, "voter signed out", None)
            .await;

        assert_eq!(record.actor_id, Some(session));
    }

    /// No explicit actor, no session: the record carries no actor.
    #[tokio::test]
    async fn test_no_actor_is_valid() {
        let (recorder, _store) = recorder_with_store();
        let ctx = RequestInfo::new("10.0.0.1");

        let record = recorder
            .record(&ctx, AuditAction::Login, "anonymous probe", None)
            .await;

        assert_eq!(record.actor_id, None);
    }

    // ---- diagnostic emission ----

    /// Test writer collecting formatted log output.
    #[derive(Clone, Default)]
    struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

    impl CaptureWriter {
        fn contents(&self) -> String {
            let buf = self.0.lock().unwrap();
            String::from_utf8_lossy(&buf).into_owned()
        }
    }

    impl io::Write for CaptureWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CaptureWriter {
        type Writer = CaptureWriter;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Exactly one diagnostic, carrying the store's failure message.
    #[tokio::test]
    async fn test_store_failure_emits_one_diagnostic() {
        let writer = CaptureWriter::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let (recorder, store) = recorder_with_store();
        store.reject_writes("simulated outage");
        let ctx = RequestInfo::new("203.0.113.7");

        recorder
            .record(&ctx, AuditAction::LoginFailed, "bad password", None)
            .await;

        let output = writer.contents();
        assert_eq!(output.matches("simulated outage").count(), 1);
    }

    /// A successful write emits no error diagnostic.
    #[tokio::test]
    async fn test_success_emits_no_diagnostic() {
        let writer = CaptureWriter::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let (recorder, _store) = recorder_with_store();
        let ctx = RequestInfo::new("203.0.113.7");

        recorder
            .record(&ctx, AuditAction::Login, "voter signed in", None)
            .await;

        assert!(!writer.contents().contains("Failed to persist"));
    }
}
