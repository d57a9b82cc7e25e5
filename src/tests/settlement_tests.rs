// src/tests/settlement_tests.rs

use super::harness::{Harness, assert_money_eq, equal_split, split};
use crate::error::LedgerError;
use crate::ledger::simplify::simplify;
use crate::storage::Storage;
use uuid::Uuid;

/// Group of three with Alice up 60 and Bob/Carol down 30 each.
async fn seeded() -> (Harness, Uuid, Vec<Uuid>) {
    let h = Harness::new();
    let (group, users) = h.group_with(&["Alice", "Bob", "Carol"]).await;
    h.expenses
        .add_expense(group, users[0], 90.0, "Dinner".into(), equal_split(&users, 30.0))
        .await
        .unwrap();
    (h, group, users)
}

#[tokio::test]
async fn settlement_moves_both_balances_and_is_recorded() {
    let (h, group, users) = seeded().await;
    let (alice, bob, carol) = (users[0], users[1], users[2]);

    h.settlements.settle(group, bob, alice, 30.0).await.unwrap();

    let balances = h.balances(group).await;
    assert_money_eq(balances[&alice], 30.0);
    assert_money_eq(balances[&bob], 0.0);
    assert_money_eq(balances[&carol], -30.0);

    let transfers = simplify(&balances);
    assert_eq!(transfers.len(), 1);
    assert_eq!(transfers[0].from_user, carol);
    assert_eq!(transfers[0].to_user, alice);
    assert_money_eq(transfers[0].amount, 30.0);

    let recorded = h.storage.list_settlements(group).await.unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].payer_id, bob);
    assert_eq!(recorded[0].payee_id, alice);
    assert_money_eq(recorded[0].amount, 30.0);
}

#[tokio::test]
async fn settlement_above_outstanding_debt_is_rejected_unchanged() {
    let (h, group, users) = seeded().await;
    let (alice, bob) = (users[0], users[1]);
    let before = h.balances(group).await;

    let err = h.settlements.settle(group, bob, alice, 30.01).await.unwrap_err();
    match err {
        LedgerError::SettlementLimitExceeded { amount, max_allowed } => {
            assert_money_eq(amount, 30.01);
            assert_money_eq(max_allowed, 30.0);
        }
        other => panic!("expected SettlementLimitExceeded, got {other:?}"),
    }

    let after = h.balances(group).await;
    for (user_id, balance) in before {
        assert_money_eq(after[&user_id], balance);
    }
    assert!(h.storage.list_settlements(group).await.unwrap().is_empty());
}

#[tokio::test]
async fn limit_is_bounded_by_the_creditor_side_too() {
    let h = Harness::new();
    let (group, users) = h.group_with(&["Alice", "Bob", "Carol"]).await;
    let (alice, bob, carol) = (users[0], users[1], users[2]);

    // Bob owes 50 in total, but Alice is only owed 20 of it
    h.expenses
        .add_expense(
            group,
            alice,
            20.0,
            "Coffee".into(),
            vec![split(bob, 20.0)],
        )
        .await
        .unwrap();
    h.expenses
        .add_expense(
            group,
            carol,
            30.0,
            "Snacks".into(),
            vec![split(bob, 30.0)],
        )
        .await
        .unwrap();

    let err = h.settlements.settle(group, bob, alice, 25.0).await.unwrap_err();
    assert!(
        matches!(err, LedgerError::SettlementLimitExceeded { max_allowed, .. } if (max_allowed - 20.0).abs() < 1e-9)
    );
    h.settlements.settle(group, bob, alice, 20.0).await.unwrap();
}

#[tokio::test]
async fn settling_when_nothing_is_owed_fails() {
    let (h, group, users) = seeded().await;
    let (alice, bob, carol) = (users[0], users[1], users[2]);

    // Alice is a creditor, she owes nothing
    let err = h.settlements.settle(group, alice, bob, 10.0).await.unwrap_err();
    assert!(matches!(err, LedgerError::NothingOwed(u) if u == alice));

    // Carol is a debtor, she is not owed anything
    let err = h.settlements.settle(group, bob, carol, 10.0).await.unwrap_err();
    assert!(matches!(err, LedgerError::NothingToReceive(u) if u == carol));
}

#[tokio::test]
async fn rejects_malformed_settlements() {
    let (h, group, users) = seeded().await;
    let (alice, bob) = (users[0], users[1]);
    let outsider = Uuid::new_v4();

    let err = h.settlements.settle(group, bob, bob, 10.0).await.unwrap_err();
    assert!(matches!(err, LedgerError::SelfSettlement));

    let err = h.settlements.settle(group, bob, alice, 0.0).await.unwrap_err();
    assert!(matches!(err, LedgerError::InvalidAmount { .. }));

    let err = h.settlements.settle(group, bob, alice, -5.0).await.unwrap_err();
    assert!(matches!(err, LedgerError::InvalidAmount { .. }));

    let err = h.settlements.settle(group, outsider, alice, 5.0).await.unwrap_err();
    assert!(matches!(err, LedgerError::NotGroupMember(u) if u == outsider));

    let err = h
        .settlements
        .settle(Uuid::new_v4(), bob, alice, 5.0)
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::GroupNotFound(_)));
}

#[tokio::test]
async fn partial_settlements_chain_up_to_the_limit() {
    let (h, group, users) = seeded().await;
    let (alice, bob) = (users[0], users[1]);

    h.settlements.settle(group, bob, alice, 12.5).await.unwrap();
    h.settlements.settle(group, bob, alice, 17.5).await.unwrap();

    let balances = h.balances(group).await;
    assert_money_eq(balances[&bob], 0.0);

    // Fully settled now, nothing further to pay down
    let err = h.settlements.settle(group, bob, alice, 0.01).await.unwrap_err();
    assert!(matches!(err, LedgerError::NothingOwed(u) if u == bob));
}
