//! SQLite-backed audit store.

use crate::store::{AuditStore, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scrutin_audit_types::{AuditAction, AuditRecord, AuditRecordId, NewAuditRecord};
use scrutin_common_core::VoterId;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteRow,
};
use sqlx::Row;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, instrument};

/// Configuration for the SQLite audit store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the SQLite database file.
    pub database_path: String,
    /// Minimum number of pooled connections.
    pub min_connections: u32,
    /// Maximum number of pooled connections.
    pub max_connections: u32,
    /// Connection acquire timeout.
    pub acquire_timeout: Duration,
    /// Busy timeout for a locked database.
    pub busy_timeout: Duration,
    /// Enable WAL mode for better write concurrency.
    pub wal_mode: bool,
    /// Create the database file if it does not exist.
    pub create_if_missing: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: "scrutin-audit.db".to_string(),
            min_connections: 1,
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
            busy_timeout: Duration::from_secs(5),
            wal_mode: true,
            create_if_missing: true,
        }
    }
}

impl StoreConfig {
    pub fn builder() -> StoreConfigBuilder {
        StoreConfigBuilder::default()
    }

    /// In-memory database, single connection so all queries see one store.
    pub fn in_memory() -> Self {
        Self {
            database_path: ":memory:".to_string(),
            min_connections: 1,
            max_connections: 1,
            wal_mode: false,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        if self.min_connections > self.max_connections {
            return Err(StoreError::InvalidConfig(
                "min_connections cannot exceed max_connections".to_string(),
            ));
        }

        if self.max_connections == 0 {
            return Err(StoreError::InvalidConfig(
                "max_connections must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for [`StoreConfig`].
#[derive(Default)]
pub struct StoreConfigBuilder {
    config: StoreConfig,
}

impl StoreConfigBuilder {
    pub fn database_path(mut self, path: impl Into<String>) -> Self {
        self.config.database_path = path.into();
        self
    }

    pub fn min_connections(mut self, min: u32) -> Self {
        self.config.min_connections = min;
        self
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.config.max_connections = max;
        self
    }

    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.config.acquire_timeout = timeout;
        self
    }

    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.config.busy_timeout = timeout;
        self
    }

    pub fn wal_mode(mut self, enabled: bool) -> Self {
        self.config.wal_mode = enabled;
        self
    }

    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.config.create_if_missing = create;
        self
    }

    pub fn build(self) -> Result<StoreConfig, StoreError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Audit store backed by a SQLite connection pool.
pub struct SqliteAuditStore {
    pool: SqlitePool,
    config: StoreConfig,
}

impl SqliteAuditStore {
    /// Connect to the database and bootstrap the audit schema.
    #[instrument(skip(config), fields(path = %config.database_path))]
    pub async fn connect(config: StoreConfig) -> Result<Self, StoreError> {
        config.validate()?;

        let connect_options = Self::build_connect_options(&config)?;

        let pool = SqlitePoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(connect_options)
            .await?;

        let store = Self { pool, config };
        store.init_schema().await?;

        info!(
            "Audit store ready with {} max connections",
            store.config.max_connections
        );

        Ok(store)
    }

    fn build_connect_options(config: &StoreConfig) -> Result<SqliteConnectOptions, StoreError> {
        let mut options =
            SqliteConnectOptions::from_str(&format!("sqlite:{}", config.database_path))
                .map_err(|e| StoreError::InvalidConfig(e.to_string()))?
                .create_if_missing(config.create_if_missing)
                .busy_timeout(config.busy_timeout);

        if config.wal_mode {
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        Ok(options)
    }

    /// Create the audit table if it does not exist yet.
    async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS audit_records (
                id TEXT PRIMARY KEY,
                actor_id TEXT,
                action TEXT NOT NULL,
                description TEXT NOT NULL,
                source_address TEXT NOT NULL,
                created_at DATETIME NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_audit_records_created_at
             ON audit_records (created_at)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Perform a connectivity check.
    pub async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(())
    }

    /// Close the pool gracefully.
    #[instrument(skip(self))]
    pub async fn close(&self) {
        info!("Closing audit store pool");
        self.pool.close().await;
    }

    /// Check if the pool is closed.
    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}

#[async_trait]
impl AuditStore for SqliteAuditStore {
    async fn insert(&self, draft: NewAuditRecord) -> Result<AuditRecord, StoreError> {
        if self.pool.is_closed() {
            return Err(StoreError::Unavailable(
                "connection pool is closed".to_string(),
            ));
        }

        let record = AuditRecord {
            id: AuditRecordId::new(),
            actor_id: draft.actor_id,
            action: draft.action,
            description: draft.description,
            source_address: draft.source_address,
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO audit_records
                 (id, actor_id, action, description, source_address, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(record.id.to_string())
        .bind(record.actor_id.map(|a| a.to_string()))
        .bind(record.action.to_string())
        .bind(&record.description)
        .bind(&record.source_address)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(record)
    }

    async fn recent(&self, limit: u32) -> Result<Vec<AuditRecord>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, actor_id, action, description, source_address, created_at
             FROM audit_records
             ORDER BY created_at DESC, id DESC
             LIMIT ?1",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_record).collect()
    }
}

fn row_to_record(row: SqliteRow) -> Result<AuditRecord, StoreError> {
    let id: String = row.try_get("id")?;
    let actor_id: Option<String> = row.try_get("actor_id")?;
    let action: String = row.try_get("action")?;
    let description: String = row.try_get("description")?;
    let source_address: String = row.try_get("source_address")?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;

    let id = AuditRecordId::parse(&id)
        .map_err(|_| StoreError::Corrupt(format!("bad record id '{id}'")))?;
    let actor_id = actor_id
        .map(|a| {
            VoterId::parse(&a).map_err(|_| StoreError::Corrupt(format!("bad actor id '{a}'")))
        })
        .transpose()?;
    // FromStr falls back to Custom for labels outside the vocabulary.
    let action = AuditAction::from_str(&action).unwrap_or(AuditAction::Custom(action));

    Ok(AuditRecord {
        id,
        actor_id,
        action,
        description,
        source_address,
        created_at,
    })
}
