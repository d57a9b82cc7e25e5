use crate::money::round_to_cents;
use std::collections::HashMap;
use uuid::Uuid;

/// Balance table keyed by (group, user) plus a per-group ledger version.
///
/// Persistence-adjacent only: no business rules live here. Every write is
/// rounded to cents, and the version counter backs the optimistic
/// concurrency check in [`super::Storage::commit`].
#[derive(Debug, Default)]
pub struct BalanceBook {
    rows: HashMap<(Uuid, Uuid), f64>,
    versions: HashMap<Uuid, u64>,
}

impl BalanceBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a zero row for every user that does not have one yet.
    pub fn ensure<'a>(&mut self, group_id: Uuid, users: impl IntoIterator<Item = &'a Uuid>) {
        for user_id in users {
            self.rows.entry((group_id, *user_id)).or_insert(0.0);
        }
    }

    /// Adds a delta to a row, rounding the result to cents
    /// (half away from zero). The row must exist.
    pub fn apply(&mut self, group_id: Uuid, user_id: Uuid, delta: f64) {
        if let Some(balance) = self.rows.get_mut(&(group_id, user_id)) {
            *balance = round_to_cents(*balance + delta);
        }
    }

    pub fn get(&self, group_id: Uuid, user_id: Uuid) -> Option<f64> {
        self.rows.get(&(group_id, user_id)).copied()
    }

    pub fn group_balances(&self, group_id: Uuid) -> HashMap<Uuid, f64> {
        self.rows
            .iter()
            .filter(|((gid, _), _)| *gid == group_id)
            .map(|((_, uid), balance)| (*uid, *balance))
            .collect()
    }

    pub fn version(&self, group_id: Uuid) -> u64 {
        self.versions.get(&group_id).copied().unwrap_or(0)
    }

    pub fn bump(&mut self, group_id: Uuid) {
        *self.versions.entry(group_id).or_insert(0) += 1;
    }
}
