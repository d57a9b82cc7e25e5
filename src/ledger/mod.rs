pub mod aggregate;
pub mod effect;
pub mod expense;
pub mod settlement;
pub mod simplify;
