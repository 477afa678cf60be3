//! Audit logging for authorization decisions
//!
//! Provides a structured JSON-lines trail of every allow/deny decision,
//! whether it was served from the cache or freshly evaluated.

use anyhow::{Context, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::AuthorizationAuditRecord;
use crate::domain::ports::AuditSink;

/// Audit logger appending decisions to a file
#[derive(Clone)]
pub struct AuditLogger {
    log_file: Arc<Mutex<File>>,
    path: PathBuf,
}

impl AuditLogger {
    /// Create a new audit logger writing to the specified file
    ///
    /// Creates parent directories if they don't exist
    /// Opens file in append mode to preserve existing audit trail
    pub async fn new(log_path: impl AsRef<Path>) -> Result<Self> {
        let log_path = log_path.as_ref();

        if let Some(parent) = log_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context("failed to create audit log directory")?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)
            .with_context(|| format!("failed to open audit log file {}", log_path.display()))?;

        Ok(Self {
            log_file: Arc::new(Mutex::new(file)),
            path: log_path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write one record as a JSON line and mirror it to tracing
    pub fn log_record(&self, record: &AuthorizationAuditRecord) -> Result<()> {
        let json = serde_json::to_string(record).context("failed to serialize audit record")?;

        {
            let mut file = self.log_file.lock();
            writeln!(file, "{json}").context("failed to write audit record")?;
            file.flush().context("failed to flush audit log")?;
        }

        info!(
            agent_id = %record.agent_id,
            action_type = %record.action_type,
            maturity = %record.maturity,
            allowed = record.allowed,
            source = record.source.as_str(),
            "authorization audit"
        );

        Ok(())
    }
}

#[async_trait]
impl AuditSink for AuditLogger {
    async fn record(&self, record: &AuthorizationAuditRecord) -> DomainResult<()> {
        self.log_record(record)
            .map_err(|e| DomainError::Audit(format!("{e:#}")))
    }
}

/// Audit sink retaining records in memory
#[derive(Debug, Default, Clone)]
pub struct MemoryAuditSink {
    records: Arc<Mutex<Vec<AuthorizationAuditRecord>>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<AuthorizationAuditRecord> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AuditSink for MemoryAuditSink {
    async fn record(&self, record: &AuthorizationAuditRecord) -> DomainResult<()> {
        self.records.lock().push(record.clone());
        Ok(())
    }
}
