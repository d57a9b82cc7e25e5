pub mod audit;
pub mod balance;
pub mod expense;
pub mod settlement;
pub mod transfer;

pub use audit::{AuditAction, AuditEntry};
pub use balance::Balance;
pub use expense::{Expense, Split};
pub use settlement::Settlement;
pub use transfer::Transfer;
