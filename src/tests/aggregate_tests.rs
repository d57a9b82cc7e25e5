// src/tests/aggregate_tests.rs

use super::harness::{Harness, assert_money_eq, split};
use uuid::Uuid;

#[tokio::test]
async fn summary_merges_counterparties_across_groups_by_name() {
    let h = Harness::new();
    let (alice, bob, carol) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    h.directory.add_user(alice, "Alice").await;
    h.directory.add_user(bob, "Bob").await;
    h.directory.add_user(carol, "Carol").await;

    let trip = Uuid::new_v4();
    let flat = Uuid::new_v4();
    h.directory.add_group(trip, vec![alice, bob, carol]).await;
    h.directory.add_group(flat, vec![alice, bob]).await;

    // Trip: Bob owes Alice 20, Carol owes Alice 15
    h.expenses
        .add_expense(
            trip,
            alice,
            35.0,
            "Fuel".into(),
            vec![split(bob, 20.0), split(carol, 15.0)],
        )
        .await
        .unwrap();
    // Flat: Bob owes Alice another 40
    h.expenses
        .add_expense(flat, alice, 40.0, "Internet".into(), vec![split(bob, 40.0)])
        .await
        .unwrap();

    let summary = h.aggregator.user_summary(alice).await.unwrap();
    assert_money_eq(summary.total_balance, 75.0);
    assert!(summary.owed_to.is_empty());
    assert_eq!(summary.owed_from.len(), 2);
    // Name-sorted output
    assert_eq!(summary.owed_from[0].name, "Bob");
    assert_money_eq(summary.owed_from[0].amount, 60.0);
    assert_eq!(summary.owed_from[1].name, "Carol");
    assert_money_eq(summary.owed_from[1].amount, 15.0);

    let summary = h.aggregator.user_summary(bob).await.unwrap();
    assert_money_eq(summary.total_balance, -60.0);
    assert!(summary.owed_from.is_empty());
    assert_eq!(summary.owed_to.len(), 1);
    assert_eq!(summary.owed_to[0].name, "Alice");
    assert_money_eq(summary.owed_to[0].amount, 60.0);
}

#[tokio::test]
async fn summary_is_empty_for_a_user_with_no_groups() {
    let h = Harness::new();
    let loner = Uuid::new_v4();
    h.directory.add_user(loner, "Loner").await;

    let summary = h.aggregator.user_summary(loner).await.unwrap();
    assert_money_eq(summary.total_balance, 0.0);
    assert!(summary.owed_to.is_empty());
    assert!(summary.owed_from.is_empty());
}

#[tokio::test]
async fn settled_groups_drop_out_of_the_summary() {
    let h = Harness::new();
    let (group, users) = h.group_with(&["Alice", "Bob"]).await;
    let (alice, bob) = (users[0], users[1]);

    h.expenses
        .add_expense(group, alice, 30.0, "Dinner".into(), vec![split(bob, 30.0)])
        .await
        .unwrap();
    h.settlements.settle(group, bob, alice, 30.0).await.unwrap();

    let summary = h.aggregator.user_summary(alice).await.unwrap();
    assert_money_eq(summary.total_balance, 0.0);
    assert!(summary.owed_from.is_empty());
}

#[tokio::test]
async fn group_balances_reports_zero_for_untouched_members() {
    let h = Harness::new();
    let (group, users) = h.group_with(&["Alice", "Bob", "Carol"]).await;
    let (alice, bob, carol) = (users[0], users[1], users[2]);

    h.expenses
        .add_expense(group, alice, 10.0, "Coffee".into(), vec![split(bob, 10.0)])
        .await
        .unwrap();

    let balances = h.balances(group).await;
    assert_eq!(balances.len(), 3);
    assert_money_eq(balances[&carol], 0.0);

    let rows = h.aggregator.balance_rows(group).await.unwrap();
    assert_eq!(
        rows.iter().map(|r| r.user_id).collect::<Vec<_>>(),
        vec![alice, bob, carol]
    );
    assert_money_eq(rows[0].net_balance, 10.0);

    let err = h.aggregator.group_balances(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, crate::error::LedgerError::GroupNotFound(_)));
}
