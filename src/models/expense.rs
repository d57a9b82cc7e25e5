use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One participant's share of an expense.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Split {
    pub user_id: Uuid,
    pub amount: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub group_id: Uuid,
    pub payer_id: Uuid,
    pub amount: f64,
    pub description: String,
    /// Normalized splits; the sole input to balance math.
    pub splits: Vec<Split>,
    /// Serialized copy of the splits at write time, kept for history display
    /// only. Never read back into ledger math.
    pub split_snapshot: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    pub fn snapshot_of(splits: &[Split]) -> String {
        serde_json::to_string(splits).unwrap_or_default()
    }
}
