use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

use crate::error::LedgerError;
use crate::models::{Expense, Settlement};

pub mod balance_book;
pub mod in_memory;

/// Point-in-time view of one group's ledger, tagged with the version the
/// balances were read at. A commit carrying that version back is rejected if
/// any other mutation landed in between.
#[derive(Clone, Debug)]
pub struct LedgerSnapshot {
    pub version: u64,
    pub balances: HashMap<Uuid, f64>,
}

impl LedgerSnapshot {
    pub fn balance_of(&self, user_id: Uuid) -> f64 {
        self.balances.get(&user_id).copied().unwrap_or(0.0)
    }
}

/// One atomic ledger mutation: balance deltas plus the record writes that
/// justify them, applied all-or-nothing against an expected group version.
///
/// Deltas are keyed per user and pre-merged, so every participant of the
/// mutation appears exactly once. A BTreeMap keeps application order
/// deterministic.
#[derive(Clone, Debug)]
pub struct WriteBatch {
    pub group_id: Uuid,
    pub expected_version: u64,
    pub deltas: BTreeMap<Uuid, f64>,
    pub put_expense: Option<Expense>,
    pub remove_expense: Option<Uuid>,
    pub put_settlement: Option<Settlement>,
}

impl WriteBatch {
    pub fn new(group_id: Uuid, expected_version: u64) -> Self {
        WriteBatch {
            group_id,
            expected_version,
            deltas: BTreeMap::new(),
            put_expense: None,
            remove_expense: None,
            put_settlement: None,
        }
    }
}

#[async_trait]
pub trait Storage: Send + Sync {
    async fn get_expense(&self, expense_id: Uuid) -> Result<Option<Expense>, LedgerError>;
    async fn list_expenses(&self, group_id: Uuid) -> Result<Vec<Expense>, LedgerError>;
    async fn list_settlements(&self, group_id: Uuid) -> Result<Vec<Settlement>, LedgerError>;

    /// Current balances of a group together with its ledger version.
    async fn group_ledger(&self, group_id: Uuid) -> Result<LedgerSnapshot, LedgerError>;

    /// Applies a batch atomically. Fails with [`LedgerError::Conflict`] and
    /// applies nothing if the group's ledger version no longer matches
    /// `expected_version`.
    async fn commit(&self, batch: WriteBatch) -> Result<(), LedgerError>;
}
