use async_trait::async_trait;
use uuid::Uuid;

use crate::error::LedgerError;

/// Group membership checks, owned by group management outside the ledger core.
#[async_trait]
pub trait Membership: Send + Sync {
    async fn group_exists(&self, group_id: Uuid) -> Result<bool, LedgerError>;
    async fn is_member(&self, group_id: Uuid, user_id: Uuid) -> Result<bool, LedgerError>;
    async fn members(&self, group_id: Uuid) -> Result<Vec<Uuid>, LedgerError>;
    async fn groups_of(&self, user_id: Uuid) -> Result<Vec<Uuid>, LedgerError>;
}

/// Display-name resolution for user-facing summaries.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn name_of(&self, user_id: Uuid) -> Result<String, LedgerError>;
}

pub mod in_memory;
