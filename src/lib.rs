#![doc(test(attr(deny(warnings))))]

//! Fruit Ledger records fruit purchases from farmers and the payments made to
//! them, persists both tables to a two-sheet spreadsheet, and derives totals,
//! profits, and per-farmer balances from them.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Fruit Ledger tracing initialized.");
    });
}
