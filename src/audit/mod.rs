use async_trait::async_trait;

use crate::error::LedgerError;
use crate::models::AuditEntry;

/// Activity-feed sink. Fire-and-forget from the ledger's perspective: a
/// failed record is logged and dropped, never propagated to the mutation.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(&self, entry: AuditEntry) -> Result<(), LedgerError>;
}

pub mod in_memory;
