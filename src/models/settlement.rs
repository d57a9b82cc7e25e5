use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recorded payment from a debtor to a creditor within a group.
/// Append-only; immutable once recorded.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Settlement {
    pub id: Uuid,
    pub group_id: Uuid,
    /// Debtor paying down their balance.
    pub payer_id: Uuid,
    /// Creditor receiving the payment.
    pub payee_id: Uuid,
    pub amount: f64,
    pub created_at: DateTime<Utc>,
}
