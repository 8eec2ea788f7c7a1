//! Persistent audit record storage for Scrutin.
//!
//! This crate provides the store seam the audit recorder writes through:
//!
//! - The [`AuditStore`] trait (append-only create, no update or delete)
//! - A SQLite implementation backed by a `sqlx` connection pool
//! - An in-memory implementation for tests and embedded use

mod memory;
mod sqlite;
mod store;

pub use memory::MemoryAuditStore;
pub use sqlite::{SqliteAuditStore, StoreConfig, StoreConfigBuilder};
pub use store::{AuditStore, StoreError};

// Re-export types for convenience
pub use scrutin_audit_types::{AuditRecord, NewAuditRecord};
