use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum AuditAction {
    AddExpense,
    EditExpense,
    DeleteExpense,
    RecordSettlement,
}

/// Advisory activity-feed record. Not part of the conservation invariant.
#[derive(Clone, Debug, Serialize)]
pub struct AuditEntry {
    pub id: Uuid,
    pub group_id: Uuid,
    pub user_id: Uuid,
    pub action: AuditAction,
    pub description: String,
    pub amount: f64,
    pub created_at: DateTime<Utc>,
}

impl AuditEntry {
    // Create audit entry with structured JSON description
    pub fn new<T: Serialize>(
        group_id: Uuid,
        user_id: Uuid,
        action: AuditAction,
        description: &T,
        amount: f64,
    ) -> Self {
        AuditEntry {
            id: Uuid::new_v4(),
            group_id,
            user_id,
            action,
            description: serde_json::to_string(description).unwrap_or_default(),
            amount,
            created_at: Utc::now(),
        }
    }
}
