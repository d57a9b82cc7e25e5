use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Serialize)]
pub enum LedgerError {
    /// Group with given ID not found
    #[error("Group {0} not found")]
    GroupNotFound(Uuid),

    /// Expense with given ID not found
    #[error("Expense {0} not found")]
    ExpenseNotFound(Uuid),

    /// User is not a member of the group
    #[error("User {0} is not a group member")]
    NotGroupMember(Uuid),

    /// Expense has no splits
    #[error("Expense must have at least one split")]
    EmptySplits,

    /// Split amounts don't add up to the expense amount
    #[error("Split total {total} does not match amount {amount}")]
    SplitMismatch { total: f64, amount: f64 },

    /// Money amount is malformed
    #[error("Invalid {field}: {reason}")]
    InvalidAmount { field: String, reason: String },

    /// Expense description is malformed
    #[error("Invalid description: {0}")]
    InvalidDescription(String),

    /// Cannot create a settlement from a user to themselves
    #[error("Cannot create settlement to self")]
    SelfSettlement,

    /// Settlement payer has no outstanding debt in the group
    #[error("User {0} owes nothing in this group")]
    NothingOwed(Uuid),

    /// Settlement payee is not owed anything in the group
    #[error("User {0} is not owed anything in this group")]
    NothingToReceive(Uuid),

    /// Settlement amount exceeds the outstanding debt between the two parties
    #[error("Settlement amount {amount} exceeds outstanding debt; at most {max_allowed} can be settled")]
    SettlementLimitExceeded { amount: f64, max_allowed: f64 },

    /// Concurrent mutation won the race; nothing was applied
    #[error("Group {0} was modified concurrently, retry the operation")]
    Conflict(Uuid),

    /// Storage operation failed
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Audit sink failed; advisory only, never aborts a mutation
    #[error("Audit error: {0}")]
    AuditError(String),
}

impl LedgerError {
    /// True for failures where retrying the whole operation can succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, LedgerError::Conflict(_))
    }
}
