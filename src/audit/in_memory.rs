use crate::audit::AuditSink;
use crate::error::LedgerError;
use crate::models::AuditEntry;
use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

pub struct InMemoryAuditSink {
    entries: Mutex<Vec<AuditEntry>>,
}

impl InMemoryAuditSink {
    pub fn new() -> Self {
        InMemoryAuditSink {
            entries: Mutex::new(Vec::new()),
        }
    }

    pub async fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().await.clone()
    }

    pub async fn entries_for_group(&self, group_id: Uuid) -> Vec<AuditEntry> {
        self.entries
            .lock()
            .await
            .iter()
            .filter(|e| e.group_id == group_id)
            .cloned()
            .collect()
    }
}

impl Default for InMemoryAuditSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditSink for InMemoryAuditSink {
    async fn record(&self, entry: AuditEntry) -> Result<(), LedgerError> {
        // For production: batch writes
        self.entries.lock().await.push(entry);
        Ok(())
    }
}
