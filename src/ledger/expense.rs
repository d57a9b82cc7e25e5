use crate::audit::AuditSink;
use crate::directory::Membership;
use crate::error::LedgerError;
use crate::ledger::effect::{effect_of, merge, negate};
use crate::models::{AuditAction, AuditEntry, Expense, Split};
use crate::money::{SPLIT_TOLERANCE, validate_amount, validate_description};
use crate::storage::{Storage, WriteBatch};
use chrono::Utc;
use log::{debug, info, warn};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

/// Applies the balance deltas implied by creating, editing, or deleting an
/// expense. Each mutation is one atomic commit; an edit applies the merged
/// `-effect(old) + effect(new)` delta set rather than two sequential passes.
pub struct ExpenseLedger<S: Storage, M: Membership, A: AuditSink> {
    storage: Arc<S>,
    membership: Arc<M>,
    audit: Arc<A>,
}

impl<S: Storage, M: Membership, A: AuditSink> ExpenseLedger<S, M, A> {
    pub fn new(storage: Arc<S>, membership: Arc<M>, audit: Arc<A>) -> Self {
        ExpenseLedger {
            storage,
            membership,
            audit,
        }
    }

    pub async fn add_expense(
        &self,
        group_id: Uuid,
        payer_id: Uuid,
        amount: f64,
        description: String,
        splits: Vec<Split>,
    ) -> Result<Uuid, LedgerError> {
        info!(
            "Adding expense in group {} paid by {} for amount {}",
            group_id, payer_id, amount
        );
        if !self.membership.group_exists(group_id).await? {
            return Err(LedgerError::GroupNotFound(group_id));
        }
        if !self.membership.is_member(group_id, payer_id).await? {
            warn!("Payer {} not in group {}", payer_id, group_id);
            return Err(LedgerError::NotGroupMember(payer_id));
        }
        validate_description(&description)?;
        validate_amount("amount", amount)?;
        self.validate_splits(group_id, amount, &splits).await?;

        let snapshot = self.storage.group_ledger(group_id).await?;
        let now = Utc::now();
        let expense = Expense {
            id: Uuid::new_v4(),
            group_id,
            payer_id,
            amount,
            description,
            split_snapshot: Expense::snapshot_of(&splits),
            splits,
            created_at: now,
            updated_at: now,
        };

        let mut batch = WriteBatch::new(group_id, snapshot.version);
        batch.deltas = effect_of(payer_id, amount, &expense.splits);
        batch.put_expense = Some(expense.clone());
        self.storage.commit(batch).await?;
        debug!("Expense created with ID: {}", expense.id);

        self.record_audit(AuditEntry::new(
            group_id,
            payer_id,
            AuditAction::AddExpense,
            &json!({ "expense_id": expense.id, "description": expense.description }),
            amount,
        ))
        .await;

        Ok(expense.id)
    }

    /// Edits an expense in place: same identity, new economic content.
    /// Splits are fully replaced.
    pub async fn edit_expense(
        &self,
        expense_id: Uuid,
        payer_id: Uuid,
        amount: f64,
        description: String,
        splits: Vec<Split>,
    ) -> Result<(), LedgerError> {
        info!("Editing expense {} to amount {}", expense_id, amount);
        let old = self
            .storage
            .get_expense(expense_id)
            .await?
            .ok_or(LedgerError::ExpenseNotFound(expense_id))?;
        let group_id = old.group_id;

        if !self.membership.is_member(group_id, payer_id).await? {
            warn!("New payer {} not in group {}", payer_id, group_id);
            return Err(LedgerError::NotGroupMember(payer_id));
        }
        validate_description(&description)?;
        validate_amount("amount", amount)?;
        self.validate_splits(group_id, amount, &splits).await?;

        let snapshot = self.storage.group_ledger(group_id).await?;
        let updated = Expense {
            payer_id,
            amount,
            description,
            split_snapshot: Expense::snapshot_of(&splits),
            splits,
            updated_at: Utc::now(),
            ..old.clone()
        };

        // The merged map carries the union of old and new participants, so a
        // user present only in the old version still gets their reversal.
        let mut batch = WriteBatch::new(group_id, snapshot.version);
        batch.deltas = merge(
            negate(effect_of(old.payer_id, old.amount, &old.splits)),
            effect_of(payer_id, amount, &updated.splits),
        );
        batch.put_expense = Some(updated);
        self.storage.commit(batch).await?;
        debug!("Expense {} updated", expense_id);

        self.record_audit(AuditEntry::new(
            group_id,
            payer_id,
            AuditAction::EditExpense,
            &json!({ "expense_id": expense_id, "old_amount": old.amount, "new_amount": amount }),
            amount,
        ))
        .await;

        Ok(())
    }

    /// Reverses the expense's effect on every participant, then removes it.
    pub async fn delete_expense(&self, expense_id: Uuid) -> Result<(), LedgerError> {
        info!("Deleting expense {}", expense_id);
        let expense = self
            .storage
            .get_expense(expense_id)
            .await?
            .ok_or(LedgerError::ExpenseNotFound(expense_id))?;

        let snapshot = self.storage.group_ledger(expense.group_id).await?;
        let mut batch = WriteBatch::new(expense.group_id, snapshot.version);
        batch.deltas = negate(effect_of(expense.payer_id, expense.amount, &expense.splits));
        batch.remove_expense = Some(expense_id);
        self.storage.commit(batch).await?;
        debug!("Expense {} removed", expense_id);

        self.record_audit(AuditEntry::new(
            expense.group_id,
            expense.payer_id,
            AuditAction::DeleteExpense,
            &json!({ "expense_id": expense_id, "description": expense.description }),
            expense.amount,
        ))
        .await;

        Ok(())
    }

    async fn validate_splits(
        &self,
        group_id: Uuid,
        amount: f64,
        splits: &[Split],
    ) -> Result<(), LedgerError> {
        if splits.is_empty() {
            warn!("Empty splits for expense in group {}", group_id);
            return Err(LedgerError::EmptySplits);
        }
        let total: f64 = splits.iter().map(|s| s.amount).sum();
        if (total - amount).abs() > SPLIT_TOLERANCE {
            warn!("Splits sum {} does not match amount {}", total, amount);
            return Err(LedgerError::SplitMismatch { total, amount });
        }
        for split in splits {
            if !self.membership.is_member(group_id, split.user_id).await? {
                warn!("User {} in splits not in group {}", split.user_id, group_id);
                return Err(LedgerError::NotGroupMember(split.user_id));
            }
        }
        Ok(())
    }

    async fn record_audit(&self, entry: AuditEntry) {
        // Advisory: a failed audit write never rolls back the mutation
        if let Err(e) = self.audit.record(entry).await {
            warn!("Audit record failed: {}", e);
        }
    }
}
