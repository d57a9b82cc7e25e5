use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Materialized net position of one user within one group.
///
/// Positive: the group owes this user. Negative: this user owes the group.
/// Per group, the net balances of all members sum to zero.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Balance {
    pub group_id: Uuid,
    pub user_id: Uuid,
    pub net_balance: f64,
}
