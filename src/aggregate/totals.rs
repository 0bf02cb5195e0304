use serde::Serialize;

use crate::ledger::{Transaction, TransactionKind};

/// Income, expense, and net totals over a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_savings: f64,
}

/// Sums income and expenses separately. Empty input yields all zeros.
pub fn summarize(transactions: &[Transaction]) -> Totals {
    let (total_income, total_expenses) =
        transactions
            .iter()
            .fold((0.0, 0.0), |(income, expenses), txn| match txn.kind {
                TransactionKind::Income => (income + txn.amount, expenses),
                TransactionKind::Expense => (income, expenses + txn.amount),
            });
    Totals {
        total_income,
        total_expenses,
        net_savings: total_income - total_expenses,
    }
}

/// Percentage of `goal` reached by `net_savings`, capped at 100.
///
/// There is deliberately no lower clamp: a net loss yields a negative
/// percentage. Use [`clamped_goal_progress`] when drawing a bar.
pub fn goal_progress(net_savings: f64, goal: f64) -> f64 {
    ((net_savings / goal) * 100.0).min(100.0)
}

/// [`goal_progress`] restricted to `0..=100`.
pub fn clamped_goal_progress(net_savings: f64, goal: f64) -> f64 {
    let progress = goal_progress(net_savings, goal);
    if progress.is_nan() {
        0.0
    } else {
        progress.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_caps_at_one_hundred() {
        assert_eq!(goal_progress(800.0, 5000.0), 16.0);
        assert_eq!(goal_progress(7500.0, 5000.0), 100.0);
    }

    #[test]
    fn progress_goes_negative_on_net_loss() {
        assert_eq!(goal_progress(-250.0, 1000.0), -25.0);
        assert_eq!(clamped_goal_progress(-250.0, 1000.0), 0.0);
        assert_eq!(clamped_goal_progress(250.0, 1000.0), 25.0);
    }
}
