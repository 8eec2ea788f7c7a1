//! Audit recording for Scrutin.
//!
//! This crate provides the audit write path of the voting application. Its
//! one guarantee: persisting an audit record never blocks or fails the
//! action being audited. It includes:
//!
//! - Single-attempt, best-effort persistence through an [`AuditStore`]
//! - Actor resolution from the request context
//! - Store failures absorbed at the recorder boundary
//! - Typed helpers for common security and ballot events
//!
//! [`AuditStore`]: scrutin_audit_store::AuditStore

mod context;
mod events;
mod recorder;

pub use context::{RequestContext, RequestInfo};
pub use events::{BallotEventRecorder, SecurityEventRecorder};
pub use recorder::AuditRecorder;

// Re-export types for convenience
pub use scrutin_audit_types::{AuditAction, AuditRecord, NewAuditRecord};
