use splitbook::config::CONFIG;
use splitbook::models::Split;
use splitbook::{
    InMemoryAuditSink, InMemoryDirectory, InMemoryStore, LedgerAggregator, LedgerError,
    ExpenseLedger, SettlementLedger, simplify,
};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Demo driver: walks one group through an expense, a settlement, and the
/// resulting summaries. The HTTP surface lives outside this crate; this
/// binary stands in for it.
#[tokio::main]
async fn main() -> Result<(), LedgerError> {
    env_logger::Builder::new()
        .parse_filters(&CONFIG.log_level)
        .init();

    let storage = Arc::new(InMemoryStore::new());
    let directory = Arc::new(InMemoryDirectory::new());
    let audit = Arc::new(InMemoryAuditSink::new());

    let expenses = ExpenseLedger::new(storage.clone(), directory.clone(), audit.clone());
    let settlements = SettlementLedger::new(storage.clone(), directory.clone(), audit.clone());
    let aggregator = LedgerAggregator::new(storage.clone(), directory.clone(), directory.clone());

    let (alice, bob, carol) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    directory.add_user(alice, "Alice").await;
    directory.add_user(bob, "Bob").await;
    directory.add_user(carol, "Carol").await;

    let trip = Uuid::new_v4();
    directory.add_group(trip, vec![alice, bob, carol]).await;

    let dinner = expenses
        .add_expense(
            trip,
            alice,
            90.0,
            "Dinner".to_string(),
            vec![
                Split { user_id: alice, amount: 30.0 },
                Split { user_id: bob, amount: 30.0 },
                Split { user_id: carol, amount: 30.0 },
            ],
        )
        .await?;
    println!("Alice paid 90.00 for dinner (expense {dinner})");

    let rows = aggregator.balance_rows(trip).await?;
    println!("\nBalances:");
    for row in &rows {
        let name = directory_name(&directory, row.user_id).await;
        println!("  {:<8} {:>8.2}", name, row.net_balance);
    }
    let balances: HashMap<Uuid, f64> = rows
        .into_iter()
        .map(|row| (row.user_id, row.net_balance))
        .collect();

    println!("\nWho pays whom:");
    for t in simplify(&balances) {
        println!(
            "  {} -> {}  {:.2}",
            directory_name(&directory, t.from_user).await,
            directory_name(&directory, t.to_user).await,
            t.amount
        );
    }

    settlements.settle(trip, bob, alice, 30.0).await?;
    println!("\nBob settled 30.00 to Alice");

    let summary = aggregator.user_summary(alice).await?;
    println!(
        "\nAlice overall: {:+.2} (owed by: {})",
        summary.total_balance,
        summary
            .owed_from
            .iter()
            .map(|n| format!("{} {:.2}", n.name, n.amount))
            .collect::<Vec<_>>()
            .join(", ")
    );

    println!("\nActivity:");
    for entry in audit.entries_for_group(trip).await {
        println!("  {:?} {:.2} {}", entry.action, entry.amount, entry.description);
    }

    Ok(())
}

async fn directory_name(directory: &InMemoryDirectory, user_id: Uuid) -> String {
    use splitbook::directory::UserDirectory;
    directory.name_of(user_id).await.unwrap_or_default()
}
