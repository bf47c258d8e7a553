//! Library surface exposed for criterion benchmarks and integration testing.
//! The binary entry point lives in src/main.rs.

pub mod check;
pub mod config;
pub mod extract;
pub mod report;
pub mod resolve;
pub mod runner;
