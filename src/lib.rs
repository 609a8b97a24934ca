//! Benchmark accumulator and Markdown status reports for compiled contract
//! outputs.
//!
//! A test harness records deployment step counts, per-function invoke step
//! counts, builtin-instance counters, and artifact sizes into a JSON
//! accumulator file as execution events happen. Once a run is complete, the
//! `contract-bench-report` binary renders the accumulated data into a
//! Markdown table report, one section per contract.

pub mod execution;
pub mod layout;
pub mod report;
pub mod schema;
pub mod store;
