#![doc(test(attr(deny(warnings))))]

//! Budget Tracker records income and expense entries, keeps them in a local
//! key-value store, and derives the summary views a dashboard needs: totals,
//! a per-category expense breakdown, a monthly trend, and savings-goal progress.

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod preferences;
pub mod storage;
pub mod utils;

pub use errors::{LedgerError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing with the default filter.
pub fn init() {
    init_with_filter(None);
}

/// Initializes global tracing, preferring `filter` over the built-in directive.
/// Only the first call has any effect.
pub fn init_with_filter(filter: Option<&str>) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(filter);
        tracing::debug!("Budget Tracker tracing initialized.");
    });
}
