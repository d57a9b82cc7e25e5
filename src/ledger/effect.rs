//! Pure delta math for expense mutations.
//!
//! An expense moves the payer up by the full amount and every split member
//! down by their share; an edit is the merged set `-effect(old) +
//! effect(new)`, applied as one delta map so the old/new participant union is
//! covered in a single pass.

use crate::models::Split;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Balance deltas implied by one expense. The payer's credit and their own
/// split (if any) collapse into a single entry.
pub fn effect_of(payer_id: Uuid, amount: f64, splits: &[Split]) -> BTreeMap<Uuid, f64> {
    let mut deltas = BTreeMap::new();
    *deltas.entry(payer_id).or_insert(0.0) += amount;
    for split in splits {
        *deltas.entry(split.user_id).or_insert(0.0) -= split.amount;
    }
    deltas
}

pub fn negate(deltas: BTreeMap<Uuid, f64>) -> BTreeMap<Uuid, f64> {
    deltas.into_iter().map(|(user, d)| (user, -d)).collect()
}

/// Merges delta maps entry-wise. Users whose deltas cancel keep a zero entry,
/// which still forces their balance row to exist at commit time.
pub fn merge(mut base: BTreeMap<Uuid, f64>, other: BTreeMap<Uuid, f64>) -> BTreeMap<Uuid, f64> {
    for (user, delta) in other {
        *base.entry(user).or_insert(0.0) += delta;
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(user_id: Uuid, amount: f64) -> Split {
        Split { user_id, amount }
    }

    #[test]
    fn effect_credits_payer_and_debits_splits() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let deltas = effect_of(a, 90.0, &[split(a, 30.0), split(b, 30.0), split(c, 30.0)]);

        assert_eq!(deltas[&a], 60.0);
        assert_eq!(deltas[&b], -30.0);
        assert_eq!(deltas[&c], -30.0);
        assert!((deltas.values().sum::<f64>()).abs() < 1e-9);
    }

    #[test]
    fn effect_sums_to_zero_when_splits_match_amount() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let deltas = effect_of(a, 75.5, &[split(a, 25.5), split(b, 50.0)]);
        assert!((deltas.values().sum::<f64>()).abs() < 1e-9);
    }

    #[test]
    fn edit_merge_keeps_dropped_participants() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let old = effect_of(a, 60.0, &[split(b, 30.0), split(c, 30.0)]);
        // c drops out of the new version entirely
        let new = effect_of(a, 40.0, &[split(b, 40.0)]);

        let net = merge(negate(old), new);
        assert_eq!(net[&c], 30.0, "dropped participant still gets reversed");
        assert_eq!(net[&b], -10.0);
        assert_eq!(net[&a], -20.0);
    }

    #[test]
    fn identical_edit_merges_to_all_zero() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let splits = [split(a, 10.0), split(b, 10.0)];
        let net = merge(
            negate(effect_of(a, 20.0, &splits)),
            effect_of(a, 20.0, &splits),
        );
        assert!(net.values().all(|d| d.abs() < 1e-9));
    }
}
