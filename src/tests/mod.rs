// src/tests/mod.rs


mod aggregate_tests;
mod settlement_tests;
