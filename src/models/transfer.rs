use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A payer-to-payee transfer produced by debt simplification.
/// Derived on demand from current balances; never persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub from_user: Uuid,
    pub to_user: Uuid,
    pub amount: f64,
}
