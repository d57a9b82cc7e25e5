//! Greedy debt simplification.
//!
//! Reduces a group's net balances to the minimum number of payer-to-payee
//! transfers. Pure function, no persistence; callers rerun it on demand.
//! Always pairs the largest creditor with the largest debtor, breaking ties
//! by lowest user id, so the output is stable for a given input.

use crate::models::Transfer;
use crate::money::{SPLIT_TOLERANCE, round_to_cents};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

pub fn simplify(balances: &HashMap<Uuid, f64>) -> Vec<Transfer> {
    // BTreeMap gives ascending user id, which makes the strict comparisons
    // below resolve ties toward the lowest id.
    let mut working: BTreeMap<Uuid, f64> = balances.iter().map(|(u, b)| (*u, *b)).collect();
    let mut transfers = Vec::new();

    loop {
        let creditor = working
            .iter()
            .filter(|(_, b)| **b > SPLIT_TOLERANCE)
            .fold(None::<(Uuid, f64)>, |best, (&user, &balance)| match best {
                Some((_, b)) if b >= balance => best,
                _ => Some((user, balance)),
            });
        let debtor = working
            .iter()
            .filter(|(_, b)| **b < -SPLIT_TOLERANCE)
            .fold(None::<(Uuid, f64)>, |best, (&user, &balance)| match best {
                Some((_, b)) if b <= balance => best,
                _ => Some((user, balance)),
            });

        // One side exhausted (possibly with rounding residual on the other).
        let (Some((creditor_id, credit)), Some((debtor_id, debt))) = (creditor, debtor) else {
            break;
        };

        let transfer = round_to_cents(credit.min(-debt));
        if transfer < SPLIT_TOLERANCE {
            break;
        }

        working.insert(creditor_id, round_to_cents(credit - transfer));
        working.insert(debtor_id, round_to_cents(debt + transfer));
        transfers.push(Transfer {
            from_user: debtor_id,
            to_user: creditor_id,
            amount: transfer,
        });
    }

    transfers
}
