//! Pure summary views derived from a ledger snapshot.
//!
//! Nothing here holds state: the same transactions always produce the same
//! output, so callers simply recompute after every ledger mutation.

pub mod breakdown;
pub mod monthly;
pub mod totals;

pub use breakdown::{category_breakdown, CategoryBreakdown};
pub use monthly::{monthly_series, MonthKey, MonthlyPoint, MonthlySeries};
pub use totals::{clamped_goal_progress, goal_progress, summarize, Totals};

use crate::ledger::{Ledger, Transaction};

/// Everything the dashboard draws, computed from one snapshot.
#[derive(Debug)]
pub struct Dashboard {
    pub totals: Totals,
    pub goal: f64,
    pub goal_progress: f64,
    pub breakdown: CategoryBreakdown,
    pub monthly: MonthlySeries,
}

impl Dashboard {
    pub fn build(transactions: &[Transaction], goal: f64) -> Self {
        let totals = summarize(transactions);
        Self {
            goal_progress: goal_progress(totals.net_savings, goal),
            totals,
            goal,
            breakdown: category_breakdown(transactions),
            monthly: monthly_series(transactions),
        }
    }

    pub fn from_ledger(ledger: &Ledger) -> Self {
        Self::build(ledger.transactions(), ledger.goal())
    }

    /// Progress bar fill, `0..=100`.
    pub fn progress_bar_fill(&self) -> f64 {
        clamped_goal_progress(self.totals.net_savings, self.goal)
    }
}
