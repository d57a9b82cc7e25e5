use crate::directory::{Membership, UserDirectory};
use crate::error::LedgerError;
use crate::ledger::simplify::simplify;
use crate::models::Balance;
use crate::money::round_to_cents;
use crate::storage::Storage;
use log::debug;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NamedAmount {
    pub name: String,
    pub amount: f64,
}

/// Cross-group position of one user.
#[derive(Clone, Debug, Serialize)]
pub struct UserSummary {
    /// Sum of the user's net balances across all their groups.
    pub total_balance: f64,
    /// Counterparties this user owes, merged by display name.
    pub owed_to: Vec<NamedAmount>,
    /// Counterparties owing this user, merged by display name.
    pub owed_from: Vec<NamedAmount>,
}

/// Read-side composition over the ledger: group snapshots and the
/// per-user cross-group summary. No mutations.
pub struct LedgerAggregator<S: Storage, M: Membership, D: UserDirectory> {
    storage: Arc<S>,
    membership: Arc<M>,
    directory: Arc<D>,
}

impl<S: Storage, M: Membership, D: UserDirectory> LedgerAggregator<S, M, D> {
    pub fn new(storage: Arc<S>, membership: Arc<M>, directory: Arc<D>) -> Self {
        LedgerAggregator {
            storage,
            membership,
            directory,
        }
    }

    /// Current net balance per member. Members without a balance row yet
    /// report zero.
    pub async fn group_balances(&self, group_id: Uuid) -> Result<HashMap<Uuid, f64>, LedgerError> {
        let members = self.membership.members(group_id).await?;
        let snapshot = self.storage.group_ledger(group_id).await?;

        let mut balances: HashMap<Uuid, f64> =
            members.into_iter().map(|user_id| (user_id, 0.0)).collect();
        for (user_id, balance) in snapshot.balances {
            balances.insert(user_id, balance);
        }
        Ok(balances)
    }

    /// Same data as [`Self::group_balances`], as display-ready rows sorted by
    /// user id.
    pub async fn balance_rows(&self, group_id: Uuid) -> Result<Vec<Balance>, LedgerError> {
        let mut rows: Vec<Balance> = self
            .group_balances(group_id)
            .await?
            .into_iter()
            .map(|(user_id, net_balance)| Balance {
                group_id,
                user_id,
                net_balance,
            })
            .collect();
        rows.sort_by_key(|row| row.user_id);
        Ok(rows)
    }

    /// Runs every group the user belongs to through the simplifier and merges
    /// the transfers touching the user, keyed by counterparty name.
    pub async fn user_summary(&self, user_id: Uuid) -> Result<UserSummary, LedgerError> {
        debug!("Building summary for user {}", user_id);
        let mut total = 0.0;
        let mut owed_to: BTreeMap<String, f64> = BTreeMap::new();
        let mut owed_from: BTreeMap<String, f64> = BTreeMap::new();

        for group_id in self.membership.groups_of(user_id).await? {
            let snapshot = self.storage.group_ledger(group_id).await?;
            total += snapshot.balance_of(user_id);

            for transfer in simplify(&snapshot.balances) {
                if transfer.from_user == user_id {
                    let name = self.directory.name_of(transfer.to_user).await?;
                    *owed_to.entry(name).or_insert(0.0) += transfer.amount;
                } else if transfer.to_user == user_id {
                    let name = self.directory.name_of(transfer.from_user).await?;
                    *owed_from.entry(name).or_insert(0.0) += transfer.amount;
                }
            }
        }

        let collect = |map: BTreeMap<String, f64>| {
            map.into_iter()
                .map(|(name, amount)| NamedAmount {
                    name,
                    amount: round_to_cents(amount),
                })
                .collect()
        };

        Ok(UserSummary {
            total_balance: round_to_cents(total),
            owed_to: collect(owed_to),
            owed_from: collect(owed_from),
        })
    }
}
