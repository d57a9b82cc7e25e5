use crate::audit::AuditSink;
use crate::directory::Membership;
use crate::error::LedgerError;
use crate::models::{AuditAction, AuditEntry, Settlement};
use crate::money::{AMOUNT_EPSILON, SPLIT_TOLERANCE, round_to_cents, validate_amount};
use crate::storage::{Storage, WriteBatch};
use chrono::Utc;
use log::{debug, info, warn};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

/// Records bounded debt settlements. A settlement touches exactly two
/// balance rows and appends one immutable settlement record; expense data is
/// never read or written here.
pub struct SettlementLedger<S: Storage, M: Membership, A: AuditSink> {
    storage: Arc<S>,
    membership: Arc<M>,
    audit: Arc<A>,
}

impl<S: Storage, M: Membership, A: AuditSink> SettlementLedger<S, M, A> {
    pub fn new(storage: Arc<S>, membership: Arc<M>, audit: Arc<A>) -> Self {
        SettlementLedger {
            storage,
            membership,
            audit,
        }
    }

    /// Settles `amount` from the debtor (`payer_id`) to the creditor
    /// (`payee_id`). The amount may not exceed
    /// `min(|payer balance|, payee balance)`; the commit is rejected with
    /// [`LedgerError::Conflict`] if any other mutation lands on the group
    /// between the bound check and the write.
    pub async fn settle(
        &self,
        group_id: Uuid,
        payer_id: Uuid,
        payee_id: Uuid,
        amount: f64,
    ) -> Result<Uuid, LedgerError> {
        info!(
            "Settling {} from {} to {} in group {}",
            amount, payer_id, payee_id, group_id
        );
        if payer_id == payee_id {
            return Err(LedgerError::SelfSettlement);
        }
        if !self.membership.group_exists(group_id).await? {
            return Err(LedgerError::GroupNotFound(group_id));
        }
        for user_id in [payer_id, payee_id] {
            if !self.membership.is_member(group_id, user_id).await? {
                warn!("User {} not in group {}", user_id, group_id);
                return Err(LedgerError::NotGroupMember(user_id));
            }
        }
        validate_amount("amount", amount)?;

        let snapshot = self.storage.group_ledger(group_id).await?;
        let payer_balance = snapshot.balance_of(payer_id);
        let payee_balance = snapshot.balance_of(payee_id);

        if payer_balance >= -SPLIT_TOLERANCE {
            warn!("Payer {} owes nothing in group {}", payer_id, group_id);
            return Err(LedgerError::NothingOwed(payer_id));
        }
        if payee_balance <= SPLIT_TOLERANCE {
            warn!("Payee {} is not owed in group {}", payee_id, group_id);
            return Err(LedgerError::NothingToReceive(payee_id));
        }

        let max_allowed = round_to_cents((-payer_balance).min(payee_balance));
        if amount > max_allowed + AMOUNT_EPSILON {
            warn!(
                "Settlement {} exceeds outstanding debt {} between {} and {}",
                amount, max_allowed, payer_id, payee_id
            );
            return Err(LedgerError::SettlementLimitExceeded {
                amount,
                max_allowed,
            });
        }

        let settlement = Settlement {
            id: Uuid::new_v4(),
            group_id,
            payer_id,
            payee_id,
            amount,
            created_at: Utc::now(),
        };

        let mut batch = WriteBatch::new(group_id, snapshot.version);
        batch.deltas.insert(payer_id, amount);
        batch.deltas.insert(payee_id, -amount);
        batch.put_settlement = Some(settlement.clone());
        self.storage.commit(batch).await?;
        debug!("Settlement recorded with ID: {}", settlement.id);

        // Advisory: a failed audit write never rolls back the mutation
        if let Err(e) = self
            .audit
            .record(AuditEntry::new(
                group_id,
                payer_id,
                AuditAction::RecordSettlement,
                &json!({ "settlement_id": settlement.id, "payee_id": payee_id }),
                amount,
            ))
            .await
        {
            warn!("Audit record failed: {}", e);
        }

        Ok(settlement.id)
    }
}
