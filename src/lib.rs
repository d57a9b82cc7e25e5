pub mod audit;
pub mod config;
pub mod directory;
pub mod error;
pub mod ledger;
pub mod models;
pub mod money;
pub mod storage;

pub use audit::in_memory::InMemoryAuditSink;
pub use directory::in_memory::InMemoryDirectory;
pub use error::LedgerError;
pub use ledger::aggregate::LedgerAggregator;
pub use ledger::expense::ExpenseLedger;
pub use ledger::settlement::SettlementLedger;
pub use ledger::simplify::simplify;
pub use storage::in_memory::InMemoryStore;

#[cfg(test)]
mod tests; // Include integration tests
