//! Core library for the `dialogue-probe` CLI.
//!
//! The crate runs a table of end-to-end scenarios against a deployed
//! dialogue session API: one HTTP request per scenario, structured logs for
//! each exchange, and a pass/fail verdict that requires HTTP 200. The
//! transport and the log sink are traits so the table can be replayed
//! against test doubles.
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod runner;
pub mod scenario;
pub mod summary;
