use crate::error::LedgerError;
use crate::models::{Expense, Settlement};
use crate::storage::balance_book::BalanceBook;
use crate::storage::{LedgerSnapshot, Storage, WriteBatch};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
struct StoreState {
    expenses: HashMap<Uuid, Expense>,
    settlements: HashMap<Uuid, Vec<Settlement>>, // group_id -> settlements
    book: BalanceBook,
}

/// In-memory store. All state sits behind one mutex, so a commit is atomic
/// and fully isolated from every other operation; the version check in
/// `commit` turns the read-compute-commit window of the services into an
/// optimistic transaction.
pub struct InMemoryStore {
    state: Mutex<StoreState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        InMemoryStore {
            state: Mutex::new(StoreState::default()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for InMemoryStore {
    async fn get_expense(&self, expense_id: Uuid) -> Result<Option<Expense>, LedgerError> {
        Ok(self.state.lock().await.expenses.get(&expense_id).cloned())
    }

    async fn list_expenses(&self, group_id: Uuid) -> Result<Vec<Expense>, LedgerError> {
        // For production: use a database query with an index on group_id
        let state = self.state.lock().await;
        let mut expenses: Vec<Expense> = state
            .expenses
            .values()
            .filter(|e| e.group_id == group_id)
            .cloned()
            .collect();
        expenses.sort_by_key(|e| e.created_at);
        Ok(expenses)
    }

    async fn list_settlements(&self, group_id: Uuid) -> Result<Vec<Settlement>, LedgerError> {
        let state = self.state.lock().await;
        Ok(state.settlements.get(&group_id).cloned().unwrap_or_default())
    }

    async fn group_ledger(&self, group_id: Uuid) -> Result<LedgerSnapshot, LedgerError> {
        let state = self.state.lock().await;
        Ok(LedgerSnapshot {
            version: state.book.version(group_id),
            balances: state.book.group_balances(group_id),
        })
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), LedgerError> {
        let mut state = self.state.lock().await;

        if state.book.version(batch.group_id) != batch.expected_version {
            return Err(LedgerError::Conflict(batch.group_id));
        }

        state.book.ensure(batch.group_id, batch.deltas.keys());
        for (user_id, delta) in &batch.deltas {
            state.book.apply(batch.group_id, *user_id, *delta);
        }

        if let Some(expense) = batch.put_expense {
            state.expenses.insert(expense.id, expense);
        }
        if let Some(expense_id) = batch.remove_expense {
            state.expenses.remove(&expense_id);
        }
        if let Some(settlement) = batch.put_settlement {
            state
                .settlements
                .entry(settlement.group_id)
                .or_default()
                .push(settlement);
        }

        state.book.bump(batch.group_id);
        Ok(())
    }
}
